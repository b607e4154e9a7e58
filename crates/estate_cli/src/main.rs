//! Terminal host for the property portfolio.
//!
//! # Responsibility
//! - Map subcommands onto core routes, forms and map reconciliation.
//! - Print notices the way a browser host would show alerts and panels.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use estate_core::db::open_db;
use estate_core::view::detail::render_detail;
use estate_core::view::page::{delete_prompt, submit_create, submit_delete, submit_edit};
use estate_core::view::table::render_table;
use estate_core::{
    init_logging, load_page, try_load_map_widget, AppConfig, Page, Property, PropertyForm,
    PropertyId, PropertyRepository, PropertyService, ReconcilerState, Route, SortField,
    SqlitePropertyRepository, TableSort,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

mod render;

use render::{render_camera_calls, render_map};

#[derive(Parser)]
#[command(name = "estate")]
#[command(version, about = "Manage and map a real-estate portfolio")]
struct Cli {
    /// SQLite database file (overrides ESTATE_DB_PATH)
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files (overrides ESTATE_LOG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error (overrides ESTATE_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Print records as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    Price,
}

#[derive(Subcommand)]
enum Command {
    /// List properties as a table
    List {
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Show one property
    Show { id: PropertyId },
    /// Create a property
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: String,
        #[arg(long, allow_hyphen_values = true)]
        lng: String,
        #[arg(long, allow_hyphen_values = true)]
        price: String,
    },
    /// Edit a property; omitted fields keep their value
    Edit {
        id: PropertyId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,
    },
    /// Delete a property
    Delete {
        id: PropertyId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Render the map, optionally focused on one property
    Map {
        #[arg(long)]
        focus: Option<PropertyId>,
        /// Open every popup
        #[arg(long, conflicts_with = "hide_all")]
        show_all: bool,
        /// Close every popup
        #[arg(long)]
        hide_all: bool,
        /// Click the Nth marker (1-based) after rendering
        #[arg(long, value_name = "N")]
        click: Option<usize>,
    },
    /// Open an application path, e.g. `/map?propertyId=<id>`
    Open { path: String },
    /// Insert the sample listings
    Seed,
    /// Delete every property
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let service = PropertyService::new(SqlitePropertyRepository::new(&conn));

    match cli.command {
        Command::List { sort, desc } => {
            let mut table_sort = TableSort::default();
            let field = match sort {
                SortArg::Name => SortField::Name,
                SortArg::Price => SortField::Price,
            };
            if field != table_sort.field {
                table_sort.select(field);
            }
            if desc {
                table_sort.select(field);
            }
            let Page::List { properties } = load_page(&service, Route::PropertyList)? else {
                bail!("unexpected page for {}", Route::PropertyList);
            };
            print_list(&table_sort.sort(&properties), table_sort, cli.json)?;
        }
        Command::Show { id } => {
            let Page::Detail { property } = load_page(&service, Route::PropertyDetail(id))? else {
                bail!("unexpected page for {}", Route::PropertyDetail(id));
            };
            print_property(&property, cli.json)?;
        }
        Command::Create {
            name,
            lat,
            lng,
            price,
        } => {
            let form = PropertyForm {
                name,
                lat,
                lng,
                price,
            };
            let next = submit_create(&service, &form)?;
            show_route(&service, &config, next, cli.json)?;
        }
        Command::Edit {
            id,
            name,
            lat,
            lng,
            price,
        } => {
            let Page::Edit { mut form, .. } = load_page(&service, Route::EditProperty(id))? else {
                bail!("unexpected page for {}", Route::EditProperty(id));
            };
            form.name = name.unwrap_or(form.name);
            form.lat = lat.unwrap_or(form.lat);
            form.lng = lng.unwrap_or(form.lng);
            form.price = price.unwrap_or(form.price);
            let next = submit_edit(&service, id, &form)?;
            show_route(&service, &config, next, cli.json)?;
        }
        Command::Delete { id, yes } => {
            let Page::Detail { property } = load_page(&service, Route::PropertyDetail(id))? else {
                bail!("unexpected page for {}", Route::PropertyDetail(id));
            };
            if !yes && !confirm(&delete_prompt(&property))? {
                println!("Cancelled");
                return Ok(());
            }
            let next = submit_delete(&service, id)?;
            println!("Deleted \"{}\"", property.name);
            show_route(&service, &config, next, cli.json)?;
        }
        Command::Map {
            focus,
            show_all,
            hide_all,
            click,
        } => {
            let properties = service.list()?;
            let output = map_view(&config, &properties, focus, show_all, hide_all, click);
            print!("{output}");
        }
        Command::Open { path } => {
            let route = Route::parse(&path)?;
            show_route(&service, &config, route, cli.json)?;
        }
        Command::Seed => {
            let created = service.seed_sample_data()?;
            println!("Added {} sample properties", created.len());
        }
        Command::Clear { yes } => {
            if !yes && !confirm("Delete every property?")? {
                println!("Cancelled");
                return Ok(());
            }
            service.clear()?;
            println!("All properties deleted");
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.set_log_dir(dir.clone())?;
    }
    Ok(config)
}

/// Loads and prints whatever view `route` resolves to.
fn show_route<R: PropertyRepository>(
    service: &PropertyService<R>,
    config: &AppConfig,
    route: Route,
    json: bool,
) -> Result<()> {
    match load_page(service, route)? {
        Page::Map { properties, focus } => {
            print!("{}", map_view(config, &properties, focus, false, false, None));
        }
        Page::List { properties } => {
            let sort = TableSort::default();
            print_list(&sort.sort(&properties), sort, json)?;
        }
        Page::New { .. } => {
            println!("Use `estate create --name <NAME> --lat <LAT> --lng <LNG> --price <PRICE>`");
        }
        Page::Detail { property } => print_property(&property, json)?,
        Page::Edit { property, form } => {
            println!("Editing \"{}\" ({})", property.name, property.id);
            println!(
                "  name={} lat={} lng={} price={}",
                form.name, form.lat, form.lng, form.price
            );
        }
    }
    Ok(())
}

fn map_view(
    config: &AppConfig,
    properties: &[Property],
    focus: Option<PropertyId>,
    show_all: bool,
    hide_all: bool,
    click: Option<usize>,
) -> String {
    let mut widget = try_load_map_widget(&config.map);
    let mut state = ReconcilerState::new();

    state.reconcile(widget.as_mut(), properties, focus);
    state.on_frame(widget.as_mut());

    if show_all {
        state.open_all_popups(widget.as_mut());
    }
    if hide_all {
        state.close_all_popups(widget.as_mut());
    }
    if let Some(marker) = click
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| state.placed().get(index))
        .map(|placed| placed.marker)
    {
        state.handle_marker_click(widget.as_mut(), marker);
    }

    match &widget {
        Some(widget) => {
            let mut out = render_map(widget, &state, properties);
            if !widget.camera_calls().is_empty() {
                out.push_str(&format!(
                    "Camera moves: {}\n",
                    render_camera_calls(widget.camera_calls())
                ));
            }
            out
        }
        None => "Map unavailable: set ESTATE_MAPS_API_KEY to load the map\n".to_string(),
    }
}

fn print_list(properties: &[Property], sort: TableSort, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(properties)?);
    } else {
        print!("{}", render_table(properties, sort));
    }
    Ok(())
}

fn print_property(property: &Property, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(property)?);
    } else {
        print!("{}", render_detail(property));
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
