use std::{
    io::{Stdout, Write},
    sync::mpsc::Receiver,
    time::Duration,
};

use crossterm::{
    cursor, queue,
    terminal::{self, ClearType},
};

use crate::{
    maze::{Maze, grid::GridEvent},
    render,
};

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Copy of the watched maze, rebuilt from grid events
    mirror: Option<Maze>,
    /// Line printed above the maze
    header: String,
    /// Time to wait after each drawn step
    render_refresh_time: Duration,
    /// Redraw on every step instead of only when a phase completes
    animate: bool,
}

impl Renderer {
    /// How many refresh periods a finished phase stays on screen
    const COMPLETION_HOLD: u32 = 20;

    pub fn new(render_refresh_time: Duration, animate: bool) -> Self {
        Self {
            stdout: std::io::stdout(),
            mirror: None,
            header: String::new(),
            render_refresh_time,
            animate,
        }
    }

    fn draw_frame(&mut self) -> std::io::Result<()> {
        let Some(maze) = &self.mirror else {
            return Ok(());
        };
        if self.animate {
            queue!(
                self.stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
        }
        render::draw(maze, &self.header, &mut self.stdout)
    }

    /// Render loop: apply every grid event to the mirror and draw it.
    /// Returns once the sending side has been dropped.
    pub fn render(&mut self, grid_event_rx: Receiver<GridEvent>) -> anyhow::Result<()> {
        if self.animate {
            queue!(self.stdout, terminal::Clear(ClearType::All), cursor::Hide)?;
            self.stdout.flush()?;
        }

        // Channel disconnected means the compute side is done
        while let Ok(event) = grid_event_rx.recv() {
            match event {
                GridEvent::Initial { size, .. } => {
                    let mut mirror = Maze::new(1, None)?;
                    mirror.apply(&event)?;
                    self.mirror = Some(mirror);
                    self.header = format!("{}x{} maze", size, size);
                    tracing::debug!("[render] new {}x{} maze", size, size);
                }
                GridEvent::Step => {
                    if self.animate {
                        self.draw_frame()?;
                        std::thread::sleep(self.render_refresh_time);
                    }
                }
                GridEvent::Completed(phase) => {
                    if let Some(mirror) = self.mirror.as_mut() {
                        mirror.apply(&event)?;
                    }
                    self.header = phase.to_string();
                    self.draw_frame()?;
                    if self.animate {
                        std::thread::sleep(self.render_refresh_time * Renderer::COMPLETION_HOLD);
                    }
                }
                _ => {
                    if let Some(mirror) = self.mirror.as_mut() {
                        mirror.apply(&event)?;
                    }
                }
            }
        }

        if self.animate {
            queue!(self.stdout, cursor::Show)?;
            self.stdout.flush()?;
        }
        Ok(())
    }
}
