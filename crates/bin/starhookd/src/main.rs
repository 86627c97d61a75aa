//! # starhookd — starhook daemon
//!
//! Composition root that wires the adapters and the trigger plugins together
//! and polls the triggers the way a running imaging sequence would.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Register equipment providers and log the weather devices they offer
//! - Build the time-source registry and the host collaborators
//! - Build the configured triggers and validate them once per night
//! - Poll the triggers on a fixed cadence until Ctrl-C cancels the run
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod notifier;

use std::sync::Arc;

use starhook_adapter_virtual::{VirtualEquipment, VirtualTimeSource};
use starhook_app::cancellation::CancellationSource;
use starhook_app::localizer::StaticLocalizer;
use starhook_app::ports::{Clock, NullProgress, SystemClock, TimeSource};
use starhook_app::services::equipment_catalog::EquipmentCatalog;
use starhook_app::time_sources::TimeSourceRegistry;
use starhook_app::trigger_runner::TriggerRunner;
use starhook_app::triggers::{ExecutionContext, IntervalTrigger, TimedTrigger, TriggerServices};
use starhook_domain::device::DeviceCategory;
use starhook_domain::error::StarhookError;
use starhook_domain::trigger::SequenceStep;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::notifier::TracingNotifier;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Equipment
    let mut catalog = EquipmentCatalog::default();
    if config.virtual_adapter.enabled {
        catalog.register(VirtualEquipment::default());
    }
    for device in catalog.list_devices(DeviceCategory::Weather) {
        tracing::info!(
            unique_id = %device.unique_id,
            device_id = %device.device_id,
            "weather device available"
        );
    }

    // Host collaborators
    let mut fixed_sources: Vec<Arc<dyn TimeSource>> = Vec::new();
    if config.virtual_adapter.enabled {
        fixed_sources.push(Arc::new(VirtualTimeSource::new(
            "Sunset",
            config.virtual_adapter.sunset,
        )));
        fixed_sources.push(Arc::new(VirtualTimeSource::new(
            "Sunrise",
            config.virtual_adapter.sunrise,
        )));
    }
    let services = TriggerServices::new(
        Arc::new(SystemClock),
        Arc::new(TracingNotifier),
        Arc::new(StaticLocalizer::english()),
        TimeSourceRegistry::new(fixed_sources),
    );

    // Triggers
    let mut runner = build_runner(&config, &services);
    tracing::info!(triggers = runner.triggers().len(), "triggers ready");

    // Ctrl-C raises the cancellation signal seen by the runner and triggers
    let cancellation = CancellationSource::new();
    let signal = cancellation.signal();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("shutdown requested");
                cancellation.cancel();
            }
            Err(err) => tracing::warn!(error = %err, "unable to listen for Ctrl-C"),
        }
    });

    // Poll loop
    let context = ExecutionContext::new(config.runner.sequence_name.clone());
    let mut ticker = tokio::time::interval(config.poll_interval());
    let mut step_number: u64 = 0;
    let mut previous: Option<SequenceStep> = None;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = signal.cancelled() => break,
        }

        runner.revalidate_for_night(services.clock.now());

        step_number += 1;
        let next = SequenceStep::new(format!("step {step_number}"));
        match runner
            .poll(previous.as_ref(), Some(&next), &context, &NullProgress, &signal)
            .await
        {
            Ok(fired) if !fired.is_empty() => {
                tracing::info!(count = fired.len(), step = %next.name, "triggers fired");
            }
            Ok(_) => {}
            Err(StarhookError::Cancelled) => {
                tracing::info!(step = %next.name, "poll interrupted by shutdown");
                break;
            }
            Err(err) => return Err(err.into()),
        }
        previous = Some(next);
    }

    Ok(())
}

fn build_runner(config: &Config, services: &TriggerServices) -> TriggerRunner {
    let mut runner = TriggerRunner::default();
    if config.timed_trigger.enabled {
        runner.push(TimedTrigger::with_settings(
            services,
            config.timed_trigger.settings.clone(),
        ));
    }
    if config.interval_trigger.enabled {
        let trigger = match config.interval_trigger.seed {
            Some(seed) => IntervalTrigger::with_seed(services, seed),
            None => IntervalTrigger::new(services),
        };
        runner.push(trigger);
    }
    runner
}
