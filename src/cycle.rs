/*
 *  cycle.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  One wake cycle: connect, fetch, render, present, plan the next wake.
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

use std::time::Duration;

use embedded_graphics::pixelcolor::Gray4;
use log::{debug, error, info, warn};

use crate::assets::AssetStore;
use crate::client::ForecastSource;
use crate::config::Config;
use crate::display::frame::FrameBuf;
use crate::display::layout::RenderSession;
use crate::display::traits::PresentationSurface;
use crate::forecast::ForecastSeries;
use crate::model::{DisplayModel, Notice, RenderOptions, ScreenContent};
use crate::net::NetworkLink;
use crate::power::PowerMonitor;
use crate::timeutil;

/// Where a cycle currently is. Every path ends at `Sleeping` with a wake
/// interval; nothing is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Connecting,
    Fetching,
    Rendering,
    Presenting,
    ErrorDisplayed,
    Sleeping,
}

#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub render: RenderOptions,
    /// Deep sleep after a successful cycle.
    pub sleep: Duration,
    /// Short recovery sleep after an error path.
    pub retry_sleep: Duration,
    /// Presentation retry budget for a busy panel.
    pub present_attempts: u32,
    /// Base delay between attempts, scaled linearly per attempt.
    pub present_backoff: Duration,
}

impl CycleConfig {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            latitude: cfg.latitude(),
            longitude: cfg.longitude(),
            render: cfg.render_options(),
            sleep: cfg.sleep(),
            retry_sleep: cfg.retry_sleep(),
            present_attempts: 3,
            present_backoff: Duration::from_secs(2),
        }
    }
}

/// Owns the capability seams for the lifetime of the process and drives
/// one fetch-render-present pass per wake. Holds no forecast state
/// across cycles; deep sleep would discard it anyway.
pub struct CycleController {
    config: CycleConfig,
    network: Box<dyn NetworkLink>,
    source: Box<dyn ForecastSource>,
    power: Box<dyn PowerMonitor>,
    assets: Box<dyn AssetStore>,
    surface: Box<dyn PresentationSurface>,
    state: CycleState,
}

impl CycleController {
    pub fn new(
        config: CycleConfig,
        network: Box<dyn NetworkLink>,
        source: Box<dyn ForecastSource>,
        power: Box<dyn PowerMonitor>,
        assets: Box<dyn AssetStore>,
        surface: Box<dyn PresentationSurface>,
    ) -> Self {
        Self {
            config,
            network,
            source,
            power,
            assets,
            surface,
            state: CycleState::Idle,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    fn enter(&mut self, state: CycleState) {
        debug!("cycle: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Runs one wake cycle and returns how long to sleep before the
    /// next. Failures converge on the notice screen and a shorter wake.
    pub async fn run_cycle(&mut self) -> Duration {
        self.enter(CycleState::Connecting);
        if let Err(e) = self.network.connect() {
            warn!("network association failed: {}", e);
            return self.error_path(Notice::ConnectionFailed).await;
        }

        self.enter(CycleState::Fetching);
        let raw = match self
            .source
            .fetch(self.config.latitude, self.config.longitude)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!("forecast fetch failed: {}", e);
                self.network.disconnect();
                let notice = if e.is_transport() {
                    Notice::ConnectionFailed
                } else {
                    Notice::DataUnavailable
                };
                return self.error_path(notice).await;
            }
        };
        // radio down before the slow e-paper refresh
        self.network.disconnect();

        let Some(series) = ForecastSeries::from_value(&raw.payload) else {
            return self.error_path(Notice::DataUnavailable).await;
        };

        self.enter(CycleState::Rendering);
        let fetched_iso = raw
            .fetched_at
            .as_deref()
            .and_then(timeutil::rfc2822_to_iso);
        let model = DisplayModel::build(
            &series,
            fetched_iso.as_deref(),
            self.power.sample(),
            self.config.render,
        );
        let frame = self.render(&ScreenContent::Dashboard(model));

        self.enter(CycleState::Presenting);
        self.present_with_retry(&frame).await;

        self.enter(CycleState::Sleeping);
        info!("cycle complete, sleeping {:?}", self.config.sleep);
        self.config.sleep
    }

    async fn error_path(&mut self, notice: Notice) -> Duration {
        self.enter(CycleState::ErrorDisplayed);
        let frame = self.render(&ScreenContent::Notice(notice));
        self.present_with_retry(&frame).await;

        self.enter(CycleState::Sleeping);
        info!(
            "error cycle ({:?}), retry in {:?}",
            notice, self.config.retry_sleep
        );
        self.config.retry_sleep
    }

    fn render(&self, content: &ScreenContent) -> FrameBuf<Gray4> {
        let (width, height) = self.surface.dimensions();
        let mut session = RenderSession::new(width, height, self.assets.as_ref());
        session.compose(content);
        session.into_frame()
    }

    /// Bounded presentation retry: a busy panel gets another chance
    /// after a backoff, anything else is logged and the cycle proceeds
    /// to sleep regardless.
    async fn present_with_retry(&mut self, frame: &FrameBuf<Gray4>) {
        if let Err(e) = self.surface.init() {
            error!("surface init failed: {}", e);
            return;
        }

        for attempt in 1..=self.config.present_attempts {
            match self.surface.present(frame) {
                Ok(()) => {
                    debug!("frame presented on attempt {}", attempt);
                    return;
                }
                Err(e) if e.is_transient() && attempt < self.config.present_attempts => {
                    debug!("surface busy (attempt {}), backing off", attempt);
                    tokio::time::sleep(self.config.present_backoff * attempt).await;
                }
                Err(e) => {
                    error!("present failed on attempt {}: {}", attempt, e);
                    return;
                }
            }
        }
    }
}
