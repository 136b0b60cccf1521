//! Connect to a simulator and print autopilot telemetry as it changes.
//!
//! ```text
//! cargo run --example autopilot_monitor -- --host 192.168.1.20
//! RUST_LOG=xplane_ap=debug cargo run --example autopilot_monitor
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use xplane_ap::transport::{DEFAULT_RECEIVE_PORT, DEFAULT_SEND_PORT};
use xplane_ap::{
    FilePreferences, HeadingUnwrapper, LinkConfig, PanelAction, TelemetryState, XPlaneLink,
};

#[derive(Debug, Parser)]
#[command(about = "Monitor X-Plane autopilot state over UDP")]
struct Args {
    /// Simulator host. Overrides and replaces the stored address.
    #[arg(long)]
    host: Option<String>,

    /// Port the simulator listens on.
    #[arg(long, default_value_t = DEFAULT_SEND_PORT)]
    send_port: u16,

    /// Local port telemetry is received on.
    #[arg(long, default_value_t = DEFAULT_RECEIVE_PORT)]
    receive_port: u16,

    /// File the simulator address is remembered in.
    #[arg(long, default_value = "xplane_ap_host.txt")]
    prefs: PathBuf,
}

fn annunciators(state: &TelemetryState) -> String {
    PanelAction::BUTTONS
        .iter()
        .filter(|action| action.is_lit(state))
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = LinkConfig::default();
    config.endpoint.send_port = args.send_port;
    config.endpoint.receive_port = args.receive_port;

    let mut link = XPlaneLink::with_preferences(config, FilePreferences::new(&args.prefs));
    match args.host {
        Some(host) => link.set_target_address(host).await?,
        None => link.restart().await?,
    }
    println!("Monitoring {}", link.endpoint());

    let mut telemetry = link.telemetry();
    let mut rotation: Option<HeadingUnwrapper> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            update = telemetry.changed() => {
                let Some(state) = update else { break };

                let turned = rotation
                    .get_or_insert_with(|| HeadingUnwrapper::new(state.aircraft_heading))
                    .update(state.aircraft_heading);

                println!(
                    "HDG {:05.1} BUG {:05.1} ALT {:>6.0} TRIM {:+.3} ROT {:+8.1} [{}]",
                    state.aircraft_heading,
                    state.target_heading,
                    state.altitude_dial,
                    state.elevator_trim,
                    turned,
                    annunciators(&state),
                );
            }
        }
    }

    link.shutdown().await;
    println!("{:#?}", xplane_ap::metrics());
    Ok(())
}
