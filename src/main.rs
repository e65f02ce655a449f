/*
 *  main.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, Command};
use env_logger::Env;
use log::info;

use inkcast::assets::DirAssetStore;
use inkcast::client::HttpForecastSource;
use inkcast::config;
use inkcast::cycle::{CycleConfig, CycleController};
use inkcast::display::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use inkcast::display::surfaces::PgmSurface;
use inkcast::net::HostNetwork;
use inkcast::power::SimulatedPowerMonitor;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Battery e-paper weather board")
        .arg(Arg::new("debug")
        .action(ArgAction::SetTrue)
        .long("debug")
        .short('v')
        .alias("verbose")
        .help("Enable debug log level")
        .required(false))
        .arg(Arg::new("config")
        .short('c')
        .long("config")
        .help("YAML config file (searched in the usual places otherwise)")
        .required(false))
        .arg(Arg::new("output")
        .short('o')
        .long("output")
        .help("PGM file the software surface writes each cycle")
        .required(false))
        .arg(Arg::new("once")
        .long("once")
        .action(ArgAction::SetTrue)
        .help("Run a single wake cycle and exit (development)")
        .required(false))
        .after_help("inkcast:\
            \ne-paper weather board\
            \n\n\tFetches a compact forecast, renders the dashboard,\
            \n\tpresents it, and sleeps until the next wake.")
        .get_matches();

    let debug_enabled = matches.get_flag("debug");
    let run_once = matches.get_flag("once");

    env_logger::Builder::from_env(
        Env::default().default_filter_or(if debug_enabled { "debug" } else { "info" }),
    )
    .format_timestamp_secs()
    .init();

    info!("{} starting", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let mut cfg = config::load(matches.get_one::<String>("config").map(Path::new))?;
    if let Some(output) = matches.get_one::<String>("output") {
        cfg.output = Some(PathBuf::from(output));
    }

    info!(
        "location {:.4}, {:.4} (tz {:+}h, {})",
        cfg.latitude(),
        cfg.longitude(),
        cfg.timezone_offset(),
        if cfg.use_fahrenheit() { "fahrenheit" } else { "celsius" },
    );

    let mut controller = CycleController::new(
        CycleConfig::from_config(&cfg),
        Box::new(HostNetwork::new(cfg.ssid())),
        Box::new(HttpForecastSource::new()?),
        Box::new(SimulatedPowerMonitor::new(
            cfg.battery_volts(),
            cfg.external_power(),
        )),
        Box::new(DirAssetStore::new(cfg.icons_dir())),
        Box::new(PgmSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT, cfg.output())),
    );

    // The hardware build never returns from a cycle - it arms the RTC
    // alarm and powers down. Here the wake timer is a plain sleep.
    loop {
        let wake_after = controller.run_cycle().await;
        if run_once {
            break;
        }
        info!("waking again in {:?}", wake_after);
        tokio::time::sleep(wake_after).await;
    }

    Ok(())
}
