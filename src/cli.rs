// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

use crate::config::consts::{
    LOAD_ERROR_MESSAGE, MAX_ROOMS, MIN_ROOMS, POLL_INTERVAL, REQUEST_TIMEOUT, SOURCE_URL_ENV,
};
use crate::config::options::{AppOptions, SourceFormat, SourceLocation, SourceOptions};
use crate::core::net::fetcher_for;
use crate::csv::write_row;
use crate::error::IngestError;
use crate::ingest::Pipeline;
use crate::poller::{Poller, Refresher};
use crate::progress::Progress;
use crate::query::{Facets, Filters, SortOrder};
use crate::record::PropertyRecord;
use crate::store::{Snapshot, SnapshotStore, Status};
use crate::view::{DirectoryView, ViewState};

const WATCH_TICK: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "propdir", version, about = "Browse the published property sheet")]
pub struct Cli {
    /// Sheet export URL (defaults to the published sheet for --format)
    #[arg(long, global = true, env = SOURCE_URL_ENV)]
    url: Option<String>,

    /// Read a saved export from disk instead; takes precedence over --url
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = FormatArg::Csv)]
    format: FormatArg,

    /// Request timeout, seconds
    #[arg(long, global = true, default_value_t = REQUEST_TIMEOUT.as_secs())]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of matching properties
    List(ListArgs),
    /// Print the distinct cities, locations and room counts
    Facets,
    /// Poll the sheet and reprint the page whenever it changes
    Watch(WatchArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Csv,
    Tsv,
    /// JSON-wrapped export (gviz/tq?tqx=out:json)
    Gviz,
}

impl From<FormatArg> for SourceFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => SourceFormat::Csv,
            FormatArg::Tsv => SourceFormat::Tsv,
            FormatArg::Gviz => SourceFormat::GvizJson,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Case-insensitive substring of the venue name
    #[arg(short, long, default_value = "")]
    search: String,

    /// Exact city
    #[arg(long)]
    city: Option<String>,

    /// Exact location
    #[arg(long)]
    location: Option<String>,

    #[arg(long, default_value_t = MIN_ROOMS)]
    min_rooms: u32,

    #[arg(long, default_value_t = MAX_ROOMS)]
    max_rooms: u32,

    /// Most rooms first
    #[arg(long)]
    desc: bool,

    /// 1-based page; out-of-range pages leave you on page 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,
}

impl FilterArgs {
    fn to_filters(&self) -> Filters {
        Filters {
            search: self.search.clone(),
            city: self.city.clone(),
            location: self.location.clone(),
            min_rooms: self.min_rooms.min(self.max_rooms),
            max_rooms: self.max_rooms.max(self.min_rooms),
            sort: if self.desc { SortOrder::Desc } else { SortOrder::Asc },
        }
    }
}

#[derive(Args, Debug)]
struct ListArgs {
    #[command(flatten)]
    filters: FilterArgs,

    #[arg(short, long, value_enum, default_value_t = Output::Table)]
    output: Output,
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Seconds between refreshes
    #[arg(long, default_value_t = POLL_INTERVAL.as_secs())]
    interval: u64,

    /// Exit after this many refresh cycles (successful or not)
    #[arg(long)]
    max_refreshes: Option<u64>,
}

impl Cli {
    fn options(&self) -> AppOptions {
        let mut options = AppOptions { source: self.source_options(), ..AppOptions::default() };
        if let Command::Watch(w) = &self.command {
            options.poll.interval = Duration::from_secs(w.interval.max(1));
        }
        options
    }

    fn source_options(&self) -> SourceOptions {
        let format = SourceFormat::from(self.format);
        let mut source = SourceOptions::for_format(format);
        if let Some(path) = &self.file {
            source.location = SourceLocation::File(path.clone());
        } else if let Some(url) = &self.url {
            source.location = SourceLocation::Url(url.clone());
        }
        source.timeout = Duration::from_secs(self.timeout.max(1));
        source
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Command::Watch(_)) {
        let path = crate::log::init_file().wrap_err("opening debug log")?;
        eprintln!("Logging to {}", path.display());
    } else {
        crate::log::init_stderr();
    }

    let options = cli.options();
    let fetcher = fetcher_for(&options.source).wrap_err("building HTTP client")?;
    let pipeline = Pipeline::new(fetcher, options.source.format);

    match cli.command {
        Command::List(args) => list(&pipeline, &options, &args),
        Command::Facets => facets(&pipeline),
        Command::Watch(args) => watch(pipeline, &options, &args),
    }
}

/* ---------------- One-shot ---------------- */

fn load(pipeline: &Pipeline) -> Result<Arc<Snapshot>> {
    let records = pipeline
        .run_once()
        .wrap_err_with(|| format!("{} ({})", LOAD_ERROR_MESSAGE, pipeline.source()))?;
    Ok(Arc::new(Snapshot::new(1, records)))
}

fn list(pipeline: &Pipeline, options: &AppOptions, args: &ListArgs) -> Result<()> {
    let mut view = DirectoryView::new(options.query.clone());
    view.set_snapshot(load(pipeline)?);
    view.apply(args.filters.to_filters());
    if args.filters.page != 1 && !view.go_to_page(args.filters.page) {
        eprintln!("Page {} is out of range (1..={}); showing page 1", args.filters.page, view.total_pages());
    }

    let mut out = io::stdout().lock();
    match args.output {
        Output::Table => print_table(&mut out, &view)?,
        Output::Json => print_json(&mut out, &view)?,
        Output::Csv => print_csv(&mut out, &view)?,
    }
    out.flush()?;
    Ok(())
}

fn facets(pipeline: &Pipeline) -> Result<()> {
    let snapshot = load(pipeline)?;
    let facets = Facets::from_records(snapshot.records());

    let mut out = io::stdout().lock();
    writeln!(out, "Cities ({}):", facets.cities.len())?;
    for c in &facets.cities {
        writeln!(out, "  {c}")?;
    }
    writeln!(out, "Locations ({}):", facets.locations.len())?;
    for l in &facets.locations {
        writeln!(out, "  {l}")?;
    }
    let rooms: Vec<String> = facets.rooms.iter().map(u32::to_string).collect();
    writeln!(out, "Rooms: {} (max {})", rooms.join(", "), facets.max_rooms)?;
    Ok(())
}

/* ---------------- Watch ---------------- */

/// Counts finished cycles so `--max-refreshes` also ends on a dead source.
struct CycleCounter(Arc<AtomicU64>);

impl Progress for CycleCounter {
    fn done(&mut self, _generation: u64, _records: usize) {
        self.0.fetch_add(1, Ordering::Release);
    }
    fn failed(&mut self, _err: &IngestError) {
        self.0.fetch_add(1, Ordering::Release);
    }
}

fn watch(pipeline: Pipeline, options: &AppOptions, args: &WatchArgs) -> Result<()> {
    let store = Arc::new(SnapshotStore::new());
    let cycles = Arc::new(AtomicU64::new(0));
    let refresher = Refresher::new(pipeline, Arc::clone(&store))
        .with_progress(CycleCounter(Arc::clone(&cycles)));

    let poller = Poller::start(Arc::new(refresher), options.poll.interval).wrap_err("starting poller")?;

    let mut view = DirectoryView::new(options.query.clone());
    view.apply(args.filters.to_filters());

    let mut last_status: Option<Status> = None;
    let mut first_data = true;
    let mut out = io::stdout();

    loop {
        // Read before syncing: a counted cycle has already published, so the
        // sync below still picks up its snapshot.
        let finished = args.max_refreshes.is_some_and(|max| cycles.load(Ordering::Acquire) >= max);

        let status = store.status();
        let changed = view.sync(&store);
        if changed && first_data {
            view.go_to_page(args.filters.page);
            first_data = false;
        }

        if changed || last_status.as_ref() != Some(&status) {
            print_state(&mut out.lock(), &view, &status)?;
            last_status = Some(status);
        }

        if finished {
            break;
        }
        thread::sleep(WATCH_TICK);
    }

    poller.stop();
    Ok(())
}

fn print_state(w: &mut impl Write, view: &DirectoryView, status: &Status) -> io::Result<()> {
    writeln!(w, "----- generation {} -----", view.snapshot().generation())?;
    match view.state(status) {
        ViewState::Loading => writeln!(w, "Loading properties…"),
        ViewState::Error(msg) => writeln!(w, "{msg}"),
        ViewState::Empty | ViewState::Results => print_table(w, view),
    }
}

/* ---------------- Rendering ---------------- */

fn print_table(w: &mut impl Write, view: &DirectoryView) -> io::Result<()> {
    if view.is_empty() {
        writeln!(w, "No properties found. Try adjusting your filters.")?;
        return Ok(());
    }

    writeln!(
        w,
        "Page {} of {}  ({} properties, rooms {})",
        view.current_page(),
        view.total_pages(),
        view.len(),
        view.filters().sort.label(),
    )?;
    writeln!(w, "{:>4}  {:<32} {:<18} {:<24} {:>5}", "id", "venue", "city", "location", "rooms")?;

    for rec in view.page() {
        writeln!(
            w,
            "{:>4}  {:<32} {:<18} {:<24} {:>5}",
            rec.id,
            clip(&rec.name, 32),
            clip(&rec.city, 18),
            clip(&rec.location, 24),
            rec.rooms,
        )?;
        for c in &rec.contacts {
            writeln!(w, "      {}: {}", c.name, c.phone)?;
        }
        if rec.has_email() {
            writeln!(w, "      {}", rec.email)?;
        }
    }
    Ok(())
}

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s!(s);
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[derive(Serialize)]
struct PageOut<'a> {
    page: usize,
    total_pages: usize,
    total: usize,
    filters: &'a Filters,
    records: Vec<&'a PropertyRecord>,
}

fn print_json(w: &mut impl Write, view: &DirectoryView) -> Result<()> {
    let out = PageOut {
        page: view.current_page(),
        total_pages: view.total_pages(),
        total: view.len(),
        filters: view.filters(),
        records: view.page(),
    };
    serde_json::to_writer_pretty(&mut *w, &out)?;
    writeln!(w)?;
    Ok(())
}

fn print_csv(w: &mut impl Write, view: &DirectoryView) -> io::Result<()> {
    write_row(&mut *w, &["id", "name", "city", "location", "rooms", "email", "contacts"], ',')?;
    for rec in view.page() {
        let contacts: Vec<String> = rec.contacts.iter().map(|c| format!("{} ({})", c.name, c.phone)).collect();
        let row = [
            rec.id.to_string(),
            rec.name.clone(),
            rec.city.clone(),
            rec.location.clone(),
            rec.rooms.to_string(),
            rec.email.clone(),
            contacts.join("; "),
        ];
        write_row(&mut *w, &row, ',')?;
    }
    Ok(())
}
