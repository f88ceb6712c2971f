//! Command-line interface.
//!
//! Every subcommand prints one screen of the dashboard. Table pages take
//! the same search, sort and page options, which are replayed through the
//! page's table as grid actions so out-of-range pages clamp the same way
//! they do when browsing.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use console::Term;
use log::{debug, LevelFilter};
use motodesk_grid::{Action, PageView, ViewState};
use motodesk_render::{render_with, OutputMode, TableRenderer};
use serde::Serialize;

pub use crate::app::{Dashboard, PageName};
use crate::app::Detail;
use crate::data::{self, MonthlyRevenue, Occupancy};
use crate::domain::Booking;
use crate::error::Result;
use crate::metrics::{
    self, stat_table, Activity, CategoryCount, DashboardMetrics, DateRange, ExportFormat, Reports,
    Stat,
};
use crate::notify::Notifier;
use crate::pages::{money, parse_assignments, Page};
use crate::session::{self, title};
use crate::settings::{users_table, Section, Settings};

/// Table width when neither `--width` nor the terminal gives one.
pub const DEFAULT_WIDTH: usize = 100;

/// Number of bookings listed on the dashboard.
pub const RECENT_BOOKINGS: usize = 5;

/// Number of events in the dashboard's activity feed.
pub const RECENT_ACTIVITY: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "motodesk", version)]
#[command(about = "Motorcycle rental admin dashboard")]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "auto")]
    pub output: OutputArg,

    /// Table width in columns [default: terminal width]
    #[arg(short, long, global = true)]
    pub width: Option<usize>,

    /// Settings file
    #[arg(short, long, global = true, default_value = "motodesk.yaml")]
    pub config: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, hide = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the motorcycle inventory
    Motorcycles(TableArgs),

    /// List rental bookings
    Bookings(TableArgs),

    /// List customer accounts
    Customers(TableArgs),

    /// List payments, or show one invoice
    Payments {
        #[command(flatten)]
        table: TableArgs,

        /// Show and download the invoice for a payment
        #[arg(long, value_name = "PAYMENT_ID")]
        invoice: Option<String>,
    },

    /// Browse a page interactively, reading commands from stdin
    Browse {
        #[arg(value_enum)]
        page: PageName,
    },

    /// Key figures, revenue, activity and recent bookings
    Dashboard,

    /// Revenue, occupancy and fleet analytics
    Reports {
        /// Export the report; CSV prints the monthly revenue as CSV
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,

        /// Period the report covers
        #[arg(long, value_enum, default_value = "year")]
        range: DateRange,
    },

    /// Show business settings
    Settings {
        /// Save a section (business, pricing, notifications) to the settings file
        #[arg(long, value_name = "SECTION")]
        save: Option<Section>,

        /// Change a field of the saved section, e.g. pricing.depositPercentage=25
        #[arg(long = "set", value_name = "KEY=VALUE", requires = "save")]
        set: Vec<String>,
    },
}

/// Search, sort and paging options shared by the table pages.
#[derive(Debug, Clone, Default, Args)]
pub struct TableArgs {
    /// Only rows matching this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort by this column key
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show, counting from 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

impl TableArgs {
    /// The view state these options describe on `page`. A sort key must
    /// name one of the page's sortable columns.
    pub fn state<P: Page>(&self, page: &P) -> Result<ViewState> {
        let mut actions = Vec::new();
        if let Some(query) = &self.search {
            actions.push(Action::SetQuery(query.clone()));
        }
        if let Some(key) = &self.sort {
            page.check_sort_key(key)?;
            actions.push(Action::ToggleSort(key.clone()));
            if self.desc {
                actions.push(Action::ToggleSort(key.clone()));
            }
        }
        actions.push(Action::GoToPage(self.page.saturating_sub(1)));
        Ok(actions
            .iter()
            .fold(ViewState::new(), |state, action| page.dispatch(state, action)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputArg {
    /// Styled when stdout supports it
    #[default]
    Auto,
    /// Always styled
    Term,
    /// Plain text
    Text,
    /// JSON
    Json,
}

impl From<OutputArg> for OutputMode {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Auto => OutputMode::Auto,
            OutputArg::Term => OutputMode::Term,
            OutputArg::Text => OutputMode::Text,
            OutputArg::Json => OutputMode::Json,
        }
    }
}

/// Log level for a `-v` count.
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn terminal_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| usize::from(cols))
        .unwrap_or(DEFAULT_WIDTH)
}

/// Executes `cli`, reading browse commands from `input` and writing the
/// screen to `output`.
pub fn run<R, W>(cli: &Cli, input: R, mut output: W, notifier: &dyn Notifier) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let settings = Settings::load(&cli.config)?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let mut app = Dashboard::seeded(settings, today)?;
    let mode = OutputMode::from(cli.output);
    let renderer = TableRenderer::new(cli.width.unwrap_or_else(terminal_width));
    debug!("{:?} at width {} ({:?})", cli.command, renderer.width(), mode);

    let text = match &cli.command {
        Commands::Motorcycles(args) => page_screen(&app.motorcycles, args, &[], &renderer, mode)?,
        Commands::Bookings(args) => page_screen(&app.bookings, args, &[], &renderer, mode)?,
        Commands::Customers(args) => page_screen(&app.customers, args, &[], &renderer, mode)?,
        Commands::Payments {
            table,
            invoice: None,
        } => {
            let summary = [
                Stat::new("Total Revenue", money(app.payments.total_revenue())),
                Stat::new("Pending", money(app.payments.pending_amount())),
                Stat::new("Transactions", app.payments.transaction_count()),
            ];
            page_screen(&app.payments, table, &summary, &renderer, mode)?
        }
        Commands::Payments {
            invoice: Some(id), ..
        } => {
            let invoice = app.payments.invoice(id, &app.settings.business.name)?;
            app.payments.download_invoice(id, notifier)?;
            let detail = Detail::Invoice(invoice);
            render_with(&detail, mode, |color| {
                session::detail_text(&detail, app.bookings.table(), &renderer, color)
            })?
        }
        Commands::Browse { page } => {
            session::run(&mut app, *page, &renderer, mode, input, &mut output, notifier)?;
            return Ok(());
        }
        Commands::Dashboard => dashboard_screen(&app, &renderer, mode)?,
        Commands::Reports { export, range } => {
            if let Some(format) = export {
                metrics::export(*format, notifier);
            }
            match export {
                Some(ExportFormat::Csv) => {
                    let revenue = data::revenue_data();
                    metrics::revenue_csv(range.months(&revenue, app.today))?
                }
                _ => reports_screen(&app, *range, &renderer, mode)?,
            }
        }
        Commands::Settings { save, set } => {
            if let Some(section) = save {
                let edits = parse_assignments(set)?;
                app.settings
                    .update_section(*section, &edits, &cli.config, notifier)?;
            }
            settings_screen(&app.settings, &renderer, mode)?
        }
    };
    writeln!(output, "{}", text)?;
    Ok(())
}

fn summary_line(stats: &[Stat]) -> String {
    stats
        .iter()
        .map(|s| format!("{}: {}", s.label, s.value))
        .collect::<Vec<_>>()
        .join(" · ")
}

fn page_screen<P: Page>(
    page: &P,
    args: &TableArgs,
    summary: &[Stat],
    renderer: &TableRenderer,
    mode: OutputMode,
) -> Result<String> {
    let view = page.view(&args.state(page)?);
    Ok(render_with(&view, mode, |color| {
        let mut out = vec![title(&page.heading(), color)];
        if !summary.is_empty() {
            out.push(summary_line(summary));
        }
        out.push(String::new());
        out.push(renderer.clone().styled(color).render(&view));
        out.join("\n")
    })?)
}

/// Renders titled tables one after another.
fn sections(parts: &[(&str, &PageView)], renderer: &TableRenderer, color: bool) -> String {
    let renderer = renderer.clone().styled(color);
    parts
        .iter()
        .map(|(name, view)| format!("{}\n{}", title(name, color), renderer.render_table(view)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardOutput<'a> {
    #[serde(flatten)]
    metrics: &'a DashboardMetrics,
    revenue: &'a [MonthlyRevenue],
    by_category: &'a [CategoryCount],
    recent_activity: &'a [Activity],
    recent_bookings: &'a [Booking],
}

fn dashboard_screen(app: &Dashboard, renderer: &TableRenderer, mode: OutputMode) -> Result<String> {
    let metrics = DashboardMetrics::compute(&app.motorcycles, &app.bookings, &app.payments, app.today);
    let revenue = data::revenue_data();
    let by_category = metrics::bookings_by_category(app.motorcycles.rows(), app.bookings.rows());
    let activity = metrics::recent_activity(
        app.bookings.rows(),
        app.payments.rows(),
        app.today,
        RECENT_ACTIVITY,
    );
    let recent = metrics::recent_bookings(app.bookings.rows(), RECENT_BOOKINGS);

    let all = ViewState::new();
    let stats = metrics.stats();
    let stats_view = stat_table()?.view(&stats, &all);
    let revenue_view = Reports::revenue_table()?.view(&revenue, &all);
    let category_view = Reports::category_table()?.view(&by_category, &all);
    let activity_view = metrics::activity_table(app.today)?.view(&activity, &all);
    let recent_view = app.bookings.table().view(recent, &all);

    let data = DashboardOutput {
        metrics: &metrics,
        revenue: &revenue,
        by_category: &by_category,
        recent_activity: &activity,
        recent_bookings: recent,
    };
    Ok(render_with(&data, mode, |color| {
        format!(
            "{}\n\n{}",
            title("Dashboard: Overview of your rental business", color),
            sections(
                &[
                    ("Today", &stats_view),
                    ("Revenue Overview", &revenue_view),
                    ("Bookings by Category", &category_view),
                    ("Recent Activity", &activity_view),
                    ("Recent Bookings", &recent_view),
                ],
                renderer,
                color
            )
        )
    })?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportsOutput<'a> {
    #[serde(flatten)]
    reports: &'a Reports,
    range: DateRange,
    monthly_revenue: &'a [MonthlyRevenue],
    occupancy: &'a [Occupancy],
}

fn reports_screen(
    app: &Dashboard,
    range: DateRange,
    renderer: &TableRenderer,
    mode: OutputMode,
) -> Result<String> {
    let all_revenue = data::revenue_data();
    let all_occupancy = data::occupancy_data();
    let revenue = range.months(&all_revenue, app.today);
    let occupancy = range.months(&all_occupancy, app.today);
    let bookings = range.bookings(app.bookings.rows(), app.today);
    let reports = Reports::compute(revenue, occupancy, app.motorcycles.rows(), &bookings);

    let stats = reports.stats();
    let all = ViewState::new();
    let stats_view = stat_table()?.view(&stats, &all);
    let category_view = Reports::category_table()?.view(&reports.by_category, &all);
    let performance_view = Reports::performance_table()?.view(&reports.performance, &all);
    let revenue_view = Reports::revenue_table()?.view(revenue, &all);
    let occupancy_view = Reports::occupancy_table()?.view(occupancy, &all);

    let data = ReportsOutput {
        reports: &reports,
        range,
        monthly_revenue: revenue,
        occupancy,
    };
    Ok(render_with(&data, mode, |color| {
        format!(
            "{}\nPeriod: {}\n\n{}",
            title("Reports: Business analytics and insights", color),
            range,
            sections(
                &[
                    ("Summary", &stats_view),
                    ("Bookings by Category", &category_view),
                    ("Motorcycle Performance", &performance_view),
                    ("Monthly Revenue", &revenue_view),
                    ("Occupancy", &occupancy_view),
                ],
                renderer,
                color
            )
        )
    })?)
}

fn settings_screen(settings: &Settings, renderer: &TableRenderer, mode: OutputMode) -> Result<String> {
    let all = ViewState::new();
    let table = stat_table()?;
    let mut views = Vec::new();
    for section in Section::ALL {
        let stats = settings.stats(section);
        views.push((format!("{} Settings", section.title()), table.view(&stats, &all)));
    }
    views.push(("Users".to_string(), users_table()?.view(&settings.users, &all)));

    Ok(render_with(settings, mode, |color| {
        let parts: Vec<(&str, &PageView)> = views.iter().map(|(name, view)| (name.as_str(), view)).collect();
        format!(
            "{}\n\n{}",
            title("Settings: Manage your business settings", color),
            sections(&parts, renderer, color)
        )
    })?)
}
