// benches/ingest.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use property_directory::config::options::SourceFormat;
use property_directory::csv::parse_rows;
use property_directory::ingest::ingest_text;
use property_directory::query::{Filters, select};
use property_directory::schema::Schema;

const HEADER: &str = "Venue Name,City,Location,Person,Person Contact,Person 2,Person Contact 2,Email Address,No of Rooms";

/// A few thousand rows, every tenth a duplicate name, some quoted fields.
fn synthetic_sheet(rows: usize) -> String {
    let cities = ["Goa", "Pune", "Manali", "Jaipur"];
    let mut s = format!("{HEADER}\n");
    for i in 0..rows {
        let name = if i % 10 == 9 { format!("Venue {}", i - 1) } else { format!("Venue {i}") };
        s.push_str(&format!(
            "{name},{city},\"Sector {i}, North\",Asha,98200{i:05},,,desk{i}@example.com,{rooms}\n",
            city = cities[i % cities.len()],
            rooms = i % 600,
        ));
    }
    s
}

fn bench_ingest(c: &mut Criterion) {
    let text = synthetic_sheet(5_000);
    let schema = Schema::default();

    c.bench_function("parse_rows_5k", |b| {
        b.iter(|| black_box(parse_rows(black_box(&text), ',')).len())
    });

    c.bench_function("ingest_text_5k", |b| {
        b.iter(|| {
            let recs = ingest_text(black_box(&text), SourceFormat::Csv, &schema).unwrap_or_default();
            black_box(recs.len())
        })
    });

    let records = ingest_text(&text, SourceFormat::Csv, &schema).unwrap_or_default();
    let filters = Filters { search: "venue 1".into(), city: Some("Goa".into()), ..Filters::default() };
    c.bench_function("select_5k", |b| b.iter(|| black_box(select(black_box(&records), &filters)).len()));
}

criterion_group!(benches, bench_ingest);
criterion_main!(benches);
