use anyhow::{anyhow, Result};
use chrono::{Duration, Month, NaiveDate, Weekday};
use std::{path::Path, time::Instant};
use tablecore::{
    Aggregate, AggregateFunction, Column, Config, Filter, PackedDateTime, Summarizer, Table,
};
use tracing::{debug, info, info_span, warn};
use tracing_subscriber::{fmt, EnvFilter};

// Function to initialize tracing
fn setup_logging() {
    let filter = EnvFilter::from_default_env()
        .add_directive("tablecore_example=info".parse().unwrap())
        .add_directive("tablecore=info".parse().unwrap());

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init();
}

const STATIONS: [&str; 4] = ["Harbor", "Ridge", "Valley", "Airport"];

/// Six weeks of synthetic six-hourly readings from four stations.
fn observations() -> Result<Table> {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow!("invalid start date"))?;

    let mut station = Vec::new();
    let mut at = Vec::new();
    let mut temperature = Vec::new();
    let mut rainfall = Vec::new();
    let mut windy = Vec::new();
    for step in 0..(42 * 4) {
        let when = start + Duration::hours(6 * step);
        for (i, name) in STATIONS.iter().enumerate() {
            let phase = (step % 4) as f64 / 4.0 * std::f64::consts::TAU;
            let reading = 4.0 + i as f64 * 1.5 - 5.0 * phase.cos() + (step / 28) as f64 * 0.8;
            station.push(name.to_string());
            at.push(PackedDateTime::from(when));
            // The airport sensor drops every seventh reading.
            temperature.push(if i == 3 && step % 7 == 0 { f64::NAN } else { reading });
            rainfall.push(((step * (i as i64 + 3)) % 11 - 4).max(0));
            windy.push(Some((step + i as i64) % 5 == 0));
        }
    }

    Ok(Table::create("observations").with_columns([
        Column::strings("station", station),
        Column::date_times("at", at),
        Column::doubles("temperature", temperature),
        Column::integers("rainfall", rainfall),
        Column::booleans("windy", windy),
    ])?)
}

fn filter_examples(table: &Table) -> Result<()> {
    let _span = info_span!("filters", rows = table.row_count()).entered();

    let freezing = Filter::number("temperature").is_less_than_or_equal_to(0.0);
    info!("Freezing readings: {}", freezing.apply_table(table)?.size());

    let missing = Filter::number("temperature").is_missing();
    info!("Missing temperatures: {}", missing.apply_table(table)?.size());

    let coastal = Filter::string("station").is_in(["Harbor", "Airport"]);
    let leap_day = Filter::date_time("at")
        .is_in_month(Month::February)
        .and(Filter::date_time("at").is_last_day_of_month());
    let coastal_leap_day = table.filter(&coastal.and(leap_day))?;
    info!("Coastal readings on 2024-02-29: {}", coastal_leap_day.row_count());

    let weekend = Filter::date_time("at")
        .is_day_of_week(Weekday::Sat)
        .or(Filter::date_time("at").is_day_of_week(Weekday::Sun));
    let dry_weekdays = !weekend.or(Filter::number("rainfall").is_positive());
    info!("Dry weekday readings: {}", dry_weekdays.apply_table(table)?.size());

    let pattern = Filter::string("station").matches_regex("[A-Z][a-z]+y")?;
    let matched = pattern.apply_column(table.column("station")?)?;
    debug!(rows = ?matched.first(), "First station ending in 'y'");
    Ok(())
}

fn summary_examples(table: &Table, config: Config) -> Result<()> {
    let _span = info_span!("summaries").entered();
    let functions: [&dyn AggregateFunction; 5] = [
        &Aggregate::Mean,
        &Aggregate::Max,
        &Aggregate::CountMissing,
        &Aggregate::Sum,
        &Aggregate::ProportionTrue,
    ];

    let start_time = Instant::now();
    let summarizer = Summarizer::with_config(
        table,
        &["temperature", "rainfall", "windy", "station"],
        &functions,
        config,
    )?;
    for (column, names) in summarizer.resolved() {
        info!("{} <- {:?}", column, names);
    }

    let overall = summarizer.apply()?;
    print_table(&overall);

    let by_station = summarizer.by(&["station"])?;
    print_table(&by_station);

    let weekly = Summarizer::new(table, &["temperature"], &[&Aggregate::Mean, &Aggregate::StdDev])?
        .by_step("Week", 7 * 4 * STATIONS.len())?;
    print_table(&weekly);
    info!("Summaries took {:?}", start_time.elapsed());

    match Summarizer::positional(table, &["temperature", "station"], &[&Aggregate::Mean]) {
        Ok(_) => warn!("Positional summarizer unexpectedly accepted mismatched arguments"),
        Err(e) => info!("Positional summarizer rejected arguments: {}", e),
    }
    Ok(())
}

fn print_table(table: &Table) {
    info!("{} ({} rows)", table.name(), table.row_count());
    info!("  {}", table.column_names().join(" | "));
    for row in 0..table.row_count() {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.value(row).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        info!("  {}", cells.join(" | "));
    }
}

fn main() -> Result<()> {
    setup_logging();

    let config = match std::env::var("TABLECORE_CONFIG") {
        Ok(path) => Config::load_or_default(Path::new(&path)),
        Err(_) => Config::default(),
    };
    info!(?config, "Using summarizer config");

    let table = observations()?;
    info!(
        "Built '{}' with {} rows and columns {:?}",
        table.name(),
        table.row_count(),
        table.column_names()
    );

    filter_examples(&table)?;
    summary_examples(&table, config)?;

    info!("Main function finished.");
    Ok(())
}
