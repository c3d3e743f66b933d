use std::sync::Arc;

use color_eyre::eyre::Result;
use tokio::sync::Mutex;

use crate::{
    core::state::AppState,
    infrastructure::tui::{Frame, TuiLike},
    presentation::components::Components,
};

/// Draws the component tree onto the shared terminal handle
#[derive(Debug, Default)]
pub struct Renderer {
    components: Components,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn render(&self, tui: &Arc<Mutex<dyn TuiLike>>, state: &AppState) -> Result<()> {
        let mut guard = tui.lock().await;
        let mut draw = |f: &mut Frame<'_>| self.components.render(f, state);
        guard.draw(&mut draw)?;
        Ok(())
    }
}
