use std::{sync::Arc, time::Duration};

use chrono::Utc;
use color_eyre::eyre::Result;
use ratatui::layout::Rect;
use tokio::{
    sync::{mpsc, Mutex},
    time,
};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{cmd::TuiCommand, cmd_executor::CmdExecutor, raw_msg::RawMsg, state::AppState},
    infrastructure::{
        backend::ShopBackend,
        config::Config,
        session_store::SessionStore,
        shop_service::ShopService,
        tui::{event_source::EventSource, real::RealTui, Event, TuiLike},
    },
    integration::{renderer::Renderer, runtime::Runtime},
};

/// Drives the runtime from terminal events and backend responses, and owns
/// the terminal lifecycle (enter, suspend, resize, exit).
pub struct AppRunner {
    runtime: Runtime,
    tui: Arc<Mutex<dyn TuiLike>>,
    events: EventSource,
    renderer: Renderer,
    tui_rx: mpsc::UnboundedReceiver<TuiCommand>,
    shop_shutdown: Option<CancellationToken>,
}

impl AppRunner {
    /// Runner without a shop service; shop commands are dropped with a warning
    pub fn new(state: AppState, tui: Arc<Mutex<dyn TuiLike>>, events: EventSource) -> Self {
        let (tui_tx, tui_rx) = mpsc::unbounded_channel();
        let mut runtime = Runtime::new_with_executor(state, CmdExecutor::new());
        runtime.add_tui_sender(tui_tx);

        Self {
            runtime,
            tui,
            events,
            renderer: Renderer::new(),
            tui_rx,
            shop_shutdown: None,
        }
    }

    /// Starts the shop service and routes shop commands to it
    pub fn with_shop_service(
        mut self,
        backend: Arc<dyn ShopBackend>,
        sessions: SessionStore,
    ) -> Result<Self> {
        let (op_tx, shutdown, service) =
            ShopService::new(backend, sessions, self.runtime.raw_sender())?;
        service.run();
        self.runtime.set_shop_sender(op_tx);
        self.shop_shutdown = Some(shutdown);
        Ok(self)
    }

    /// Interactive runner on the real terminal
    pub fn new_with_real(
        config: Config,
        tick_rate: f64,
        frame_rate: f64,
        backend: Arc<dyn ShopBackend>,
        sessions: SessionStore,
    ) -> Result<Self> {
        let real = RealTui::new()?.tick_rate(tick_rate).frame_rate(frame_rate);
        let tui: Arc<Mutex<dyn TuiLike>> = Arc::new(Mutex::new(real));
        let events = EventSource::real(Arc::clone(&tui));
        Self::new(AppState::new(config), tui, events).with_shop_service(backend, sessions)
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn state(&self) -> &AppState {
        self.runtime.state()
    }

    /// Enters the terminal and kicks off the startup route
    pub async fn start(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;
        self.runtime.send_raw_msg(RawMsg::Init);
        self.cycle().await
    }

    /// Main loop until quit or until the event source closes
    pub async fn run(&mut self) -> Result<()> {
        self.start().await?;

        while !self.runtime.state().system.should_quit {
            tokio::select! {
                event = self.events.next() => match event {
                    Some(event) => self.handle_event(event).await?,
                    None => break,
                },
                Some(raw) = self.runtime.recv_raw() => {
                    self.runtime.send_raw_msg(raw);
                    self.cycle().await?;
                }
            }
        }

        self.shutdown().await
    }

    /// Feeds one terminal event through the update cycle
    pub async fn handle_event(&mut self, event: Event) -> Result<()> {
        let raw = match event {
            Event::Key(key) => RawMsg::Key(key),
            Event::Tick => RawMsg::Tick(Utc::now()),
            Event::Resize(width, height) => RawMsg::Resize(width, height),
            Event::Quit | Event::Closed => RawMsg::Quit,
            Event::Error => RawMsg::Error("Failed to read terminal input".to_string()),
            Event::Render => return self.render().await,
            // The terminal sends Init on every (re)start; startup is driven by `start`
            Event::Init | Event::FocusGained | Event::FocusLost | Event::Paste(_) | Event::Mouse(_) => {
                return Ok(())
            }
        };
        self.runtime.send_raw_msg(raw);
        self.cycle().await
    }

    /// Applies backend responses until none has arrived for `idle`
    pub async fn settle(&mut self, idle: Duration) -> Result<()> {
        while let Ok(Some(raw)) = time::timeout(idle, self.runtime.recv_raw()).await {
            self.runtime.send_raw_msg(raw);
            self.cycle().await?;
        }
        Ok(())
    }

    /// Stops the shop service and leaves the terminal
    pub async fn shutdown(&mut self) -> Result<()> {
        if let Some(token) = self.shop_shutdown.take() {
            token.cancel();
        }
        self.tui.lock().await.exit()
    }

    async fn cycle(&mut self) -> Result<()> {
        let errors = self.runtime.run_update_cycle();
        if !errors.is_empty() {
            for error in &errors {
                log::error!("Command failed: {error}");
            }
            // surface the queued status errors right away
            self.runtime.run_update_cycle();
        }

        while let Ok(cmd) = self.tui_rx.try_recv() {
            match cmd {
                TuiCommand::Resize { width, height } => {
                    self.tui.lock().await.resize(Rect::new(0, 0, width, height))?;
                }
            }
        }

        if self.runtime.state().system.should_suspend {
            self.tui.lock().await.suspend()?;
            self.runtime.send_raw_msg(RawMsg::Resume);
            self.runtime.run_update_cycle();
            self.tui.lock().await.resume()?;
        }

        // Every cycle ends in a render
        self.render().await
    }

    async fn render(&self) -> Result<()> {
        self.renderer.render(&self.tui, self.runtime.state()).await
    }
}
