//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use std::env;
use std::io::{self, Write};
use std::process;
use tile_grid::{Extent, TileRequest};
use utfgrid_core::core::config::{ExtentCfg, DEFAULT_CONFIG};
use utfgrid_core::core::{parse_config, read_config, ApplicationCfg, Config};
use utfgrid_core::datasource::GeojsonSource;
use utfgrid_core::service::UtfGridService;
use utfgrid_core::Grid;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        let timestamp = time::strftime("%Y-%m-%d %H:%M:%S", &t)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        writeln!(
            buf,
            "{}.{:03} {} {}",
            timestamp,
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log_env = env::var("RUST_LOG");
    let rust_log = match (args.value_of("loglevel"), rust_log_env.as_ref()) {
        (None, Ok(rust_log)) => rust_log.as_str(),
        (loglevel, _) => loglevel.unwrap_or("info"),
    };
    builder.parse_filters(rust_log);

    builder.init();
}

fn parse_numlist(numlist: &str, name: &str) -> Result<Vec<f64>, String> {
    numlist
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| format!("Error parsing '{}' as list of float values", name))
        })
        .collect()
}

/// Read configuration file and apply command line overrides
fn config_from_args(args: &ArgMatches<'_>) -> Result<ApplicationCfg, String> {
    let mut config: ApplicationCfg = match args.value_of("config") {
        Some(path) => read_config(path)?,
        None => {
            if args.value_of("extent").is_none() {
                return Err("Missing extent".to_string());
            }
            parse_config(DEFAULT_CONFIG.to_string(), "")?
        }
    };
    if let Some(path) = args.value_of("datasource") {
        config.datasource.path = path.to_string();
    }
    if let Some(numlist) = args.value_of("extent") {
        let arr = parse_numlist(numlist, "extent")?;
        if arr.len() != 4 {
            return Err("Expected 'extent' as minx,miny,maxx,maxy".to_string());
        }
        let extent = Extent {
            minx: arr[0],
            miny: arr[1],
            maxx: arr[2],
            maxy: arr[3],
        };
        extent.validate().map_err(|e| e.to_string())?;
        config.tile.extent = ExtentCfg {
            minx: extent.minx,
            miny: extent.miny,
            maxx: extent.maxx,
            maxy: extent.maxy,
        };
    }
    if let Some(size) = args.value_of("size") {
        let dims: Vec<u32> = size
            .split('x')
            .map(|v| v.parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| "Error parsing 'size' as WIDTHxHEIGHT".to_string())?;
        match dims.as_slice() {
            [width, height] => {
                config.tile.width = *width;
                config.tile.height = *height;
            }
            _ => return Err("Error parsing 'size' as WIDTHxHEIGHT".to_string()),
        }
    }
    if let Some(resolution) = args.value_of("resolution") {
        config.grid.resolution = resolution
            .parse::<u32>()
            .map_err(|_| "Error parsing 'resolution' as integer value".to_string())?;
    }
    if let Some(fields) = args.value_of("fields") {
        config.grid.fields = fields
            .split(',')
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
    }
    if let Some(path) = args.value_of("output") {
        config.output.path = Some(path.to_string());
    }
    if let Some(pretty) = args.value_of("pretty") {
        config.output.pretty = pretty
            .parse::<bool>()
            .map_err(|_| "Error parsing 'pretty' as boolean value".to_string())?;
    }
    if config.datasource.path.is_empty() {
        return Err("Missing datasource path".to_string());
    }
    if config.grid.fields.is_empty() {
        return Err("Missing field names".to_string());
    }
    Ok(config)
}

fn render(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = config_from_args(args)?;
    debug!("{:#?}", config);
    let mut service = UtfGridService::from_config(&config)?;
    service.render_to_output()
}

fn gen_config() -> String {
    let output = r#"
[output]
# path = "tile.grid.json"
pretty = true
"#;
    format!(
        "{}{}{}{}",
        GeojsonSource::gen_config(),
        TileRequest::gen_config(),
        Grid::gen_config(),
        output
    )
}

fn app<'a, 'b>() -> App<'a, 'b> {
    // http://kbknapp.github.io/clap-rs/clap/
    App::new("utfgrid")
        .version(crate_version!())
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Render UTFGrid interaction tiles from vector features")
        .subcommand(SubCommand::with_name("render")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --datasource=[FILE] 'GeoJSON FeatureCollection'
                                              --extent=[minx,miny,maxx,maxy] 'Extent of tile'
                                              --size=[WIDTHxHEIGHT] 'Tile size in pixels (Default: 256x256)'
                                              --resolution=[PIXELS] 'Grid cell size in pixels (Default: 4)'
                                              --fields=[NAME,..] 'Feature attributes included in grid data'
                                              --output=[FILE] 'Write UTFGrid JSON to FILE instead of stdout'
                                              --pretty=[true|false] 'Pretty print JSON output'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Render UTFGrid tile"))
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"))
}

fn main() {
    dotenv().ok();
    let mut app = app();

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("render", Some(sub_m)) => {
                init_logger(sub_m);
                if let Err(e) = render(sub_m) {
                    error!("{}", e);
                    process::exit(1);
                }
            }
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", gen_config());
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}
