//! Interactive terminal loop.
//!
//! One key press is one interaction: it is mapped to a controller event, the
//! controller runs it to completion (including any API call, which blocks the
//! loop), and the whole screen is redrawn from the resulting state.

pub mod keybindings;
pub mod lifecycle;

use std::error::Error;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event};
use tracing::{info, warn};

use crate::core::chat_client::ChatBackend;
use crate::core::controller::{ChatController, UiEvent};
use crate::core::history::SessionRepository;
use crate::ui::chat_loop::keybindings::{handle_key, LoopAction};
use crate::ui::chat_loop::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::ui::renderer::{ui, RenderModel};
use crate::ui::screen::ScreenState;
use crate::ui::theme::Theme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub async fn run_chat<R, B>(
    mut controller: ChatController<R, B>,
    theme: Theme,
) -> Result<(), Box<dyn Error>>
where
    R: SessionRepository,
    B: ChatBackend,
{
    let mut terminal = setup_terminal()?;
    let mut screen = ScreenState::new(controller.view().session_id.as_str());
    info!(session = %controller.view().session_id, "chat loop started");

    let result = event_loop(&mut terminal, &mut controller, &mut screen, &theme).await;

    restore_terminal(&mut terminal)?;
    info!(
        sessions = controller.store().session_ids().len(),
        "chat loop finished"
    );
    result
}

async fn event_loop<R, B>(
    terminal: &mut ChatTerminal,
    controller: &mut ChatController<R, B>,
    screen: &mut ScreenState,
    theme: &Theme,
) -> Result<(), Box<dyn Error>>
where
    R: SessionRepository,
    B: ChatBackend,
{
    loop {
        draw(terminal, controller, screen, theme)?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match handle_key(screen, controller.view(), key) {
            None => {}
            Some(LoopAction::Quit) => return Ok(()),
            Some(LoopAction::Dispatch(event)) => {
                dispatch(terminal, controller, screen, theme, event).await?;
            }
        }
    }
}

async fn dispatch<R, B>(
    terminal: &mut ChatTerminal,
    controller: &mut ChatController<R, B>,
    screen: &mut ScreenState,
    theme: &Theme,
    event: UiEvent,
) -> Result<(), Box<dyn Error>>
where
    R: SessionRepository,
    B: ChatBackend,
{
    let sending = event == UiEvent::Send && !controller.view().input.is_empty();
    if sending {
        screen.waiting = true;
        draw(terminal, controller, screen, theme)?;
    }

    let outcome = controller.handle(event).await;
    screen.waiting = false;

    if let Err(err) = outcome {
        warn!(error = %err, session = %controller.view().session_id, "interaction failed");
    }
    screen.session_draft = controller.view().session_id.to_string();
    Ok(())
}

fn draw<R, B>(
    terminal: &mut ChatTerminal,
    controller: &ChatController<R, B>,
    screen: &mut ScreenState,
    theme: &Theme,
) -> Result<(), Box<dyn Error>>
where
    R: SessionRepository,
    B: ChatBackend,
{
    let mut max_scroll = 0;
    let model = RenderModel {
        view: controller.view(),
        transcript: controller.transcript(),
        farewell: controller.shows_farewell(),
        screen,
    };
    terminal.draw(|f| max_scroll = ui(f, &model, theme))?;

    screen.max_scroll = max_scroll;
    screen.scroll_back = screen.scroll_back.min(max_scroll);
    Ok(())
}
