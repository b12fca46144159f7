use std::fs::File;

use lvmd_device_class::Config;
use snafu::{OptionExt, ResultExt};
use tracing::Level;

fn main() -> Result<(), snafu::Whatever> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let path = std::env::args().nth(1).whatever_context("usage: dump_config <lvmd.conf>")?;
    let f = File::open(&path).with_whatever_context(|_| format!("open {path}"))?;
    let config = Config::load(f).whatever_context("load")?;
    let socket_name = config.socket_name.clone();
    let manager = config.into_manager().whatever_context("device classes")?;

    tracing::info!(%socket_name, default = manager.default_device_class().name());
    for dc in manager.device_classes() {
        let stripe_size = dc.stripe_size().map(|s| s.to_string()).unwrap_or_default();
        tracing::info!(
            name = dc.name(),
            volume_group = dc.volume_group(),
            spare = dc.spare(),
            stripe = ?dc.stripe(),
            %stripe_size,
            options = ?dc.lvcreate_options(),
        );
    }

    Ok(())
}
