mod app;
mod config;
mod controls;
mod session;

use anyhow::Result;
use winit::dpi::LogicalSize;

use planar_engine::device::GpuInit;
use planar_engine::logging::init_logging;
use planar_engine::window::{Runtime, RuntimeConfig};

use crate::app::StudioApp;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    let config = StudioConfig::from_env();
    init_logging(config.logging());

    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: LogicalSize::new(config.width, config.height),
    };

    Runtime::run(runtime, GpuInit::default(), StudioApp::new(config))
}
