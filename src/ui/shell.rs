use anyhow::Result;
use chrono::Utc;

use crate::{
    domain::shell_state::ShellState,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
    },
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        actor_id = %context.actor.id,
        role = %context.actor.role,
        tick_ms = context.config.ui.tick_ms,
        "starting TUI shell"
    );

    let mut terminal = TerminalSession::enter()?;
    run_loop(event_source, orchestrator, |state| {
        terminal.draw(|frame| view::render(frame, state, Utc::now()))
    })?;

    tracing::info!("TUI shell stopped");
    Ok(())
}

/// Draws, then feeds the next event to the orchestrator until it stops.
fn run_loop<D>(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
    mut draw: D,
) -> Result<()>
where
    D: FnMut(&ShellState) -> Result<()>,
{
    while orchestrator.state().is_running() {
        draw(orchestrator.state())?;

        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::events::{AppEvent, KeyInput},
        test_support::{buyer, conversation_with_unread, ManualClock, ScriptedRandom},
        ui::event_source::MockEventSource,
        usecases::{
            chat_session::ChatSession, response_simulator::SimulatorTimings,
            shell::DefaultShellOrchestrator,
        },
    };

    fn orchestrator() -> DefaultShellOrchestrator<ManualClock, ScriptedRandom> {
        let session = ChatSession::new(
            buyer(),
            vec![conversation_with_unread("1", "Ravi Kumar", "Fresh Green Mussels", 2)],
            SimulatorTimings::default(),
            ManualClock::starting_at(1_771_063_200_000),
            ScriptedRandom::default(),
        );
        DefaultShellOrchestrator::new(session)
    }

    #[test]
    fn loop_stops_on_quit_from_source() {
        let mut source = MockEventSource::from(vec![AppEvent::Tick, AppEvent::QuitRequested]);
        let mut orchestrator = orchestrator();
        let mut frames = 0;

        run_loop(&mut source, &mut orchestrator, |_| {
            frames += 1;
            Ok(())
        })
        .expect("loop should finish");

        assert!(!orchestrator.state().is_running());
        assert_eq!(frames, 2);
    }

    #[test]
    fn loop_draws_state_after_each_event() {
        let mut source = MockEventSource::from(vec![
            AppEvent::InputKey(KeyInput::new("enter", false)),
            AppEvent::InputKey(KeyInput::new("q", false)),
            AppEvent::QuitRequested,
        ]);
        let mut orchestrator = orchestrator();
        let mut saw_detail = false;

        run_loop(&mut source, &mut orchestrator, |state| {
            saw_detail |= state.detail().is_some();
            Ok(())
        })
        .expect("loop should finish");

        assert!(saw_detail);
    }
}
