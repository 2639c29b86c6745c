//! The read → dispatch → render loop.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use anyhow::Result;
use core_actions::ModalDispatcher;
use core_config::Config;
use core_events::{EditorEvent, EventKinds};
use core_render::{Renderer, StatusContext};
use core_state::EditorState;
use core_terminal::TerminalBackend;
use core_text::TextBuffer;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    CommandQuit,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::CommandQuit => "command_quit",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct EditorRuntime {
    state: EditorState,
    dispatcher: ModalDispatcher,
    renderer: Renderer,
    redraw: Rc<Cell<bool>>,
    reset_scroll: Rc<Cell<bool>>,
}

impl EditorRuntime {
    pub fn new(config: Config) -> Self {
        let mut state = EditorState::new(TextBuffer::new());
        let redraw = Rc::new(Cell::new(true));
        let reset_scroll = Rc::new(Cell::new(false));

        let flag = redraw.clone();
        state.buffer.subscribe(
            EventKinds::TEXT_CHANGED | EventKinds::CURSOR_MOVED,
            move |_: &TextBuffer, _: &EditorEvent| flag.set(true),
        );
        let flag = reset_scroll.clone();
        state.buffer.subscribe(
            EventKinds::FILE_OPENED,
            move |_: &TextBuffer, e: &EditorEvent| {
                if let EditorEvent::FileOpened(path) = e {
                    debug!(target: "runtime", file = %path.display(), "viewport_reset");
                }
                flag.set(true);
            },
        );

        Self {
            state,
            dispatcher: ModalDispatcher::new(config),
            renderer: Renderer::new(),
            redraw,
            reset_scroll,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Run until a quit command. Terminal read failures end the loop with
    /// an error.
    pub fn run(&mut self, term: &mut dyn TerminalBackend) -> Result<ShutdownReason> {
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();

        self.render(term)?;
        loop {
            let key = term.read_key().inspect_err(|e| {
                error!(target: "runtime", error = %e, "read_key_failed");
            })?;
            let result = self.dispatcher.handle_key(key, &mut self.state, term)?;
            if result.quit {
                info!(target: "runtime", "quit");
                return Ok(ShutdownReason::CommandQuit);
            }
            if result.dirty || self.redraw.get() {
                self.render(term)?;
            }
        }
    }

    fn render(&mut self, term: &mut dyn TerminalBackend) -> Result<()> {
        if self.reset_scroll.replace(false) {
            self.renderer.viewport_mut().reset_scroll();
        }
        self.redraw.set(false);

        let prompt = self.dispatcher.prompt(&self.state);
        let (col, row) = self.state.buffer.cursor().pos();
        let status = StatusContext {
            mode: self.state.mode,
            row,
            col,
            message: self.state.message.as_deref(),
            prompt: prompt.as_ref().map(|p| p.text.as_str()),
        };
        let on_prompt = prompt.as_ref().is_some_and(|p| p.editing);
        self.renderer
            .render(term, &self.state.buffer, &status, on_prompt)
            .inspect_err(|e| error!(target: "render", error = %e, "render_failed"))
    }
}
