use crate::error::ChartResult;
use crate::render::{DrawCommand, RenderFrame, Renderer};

/// Headless renderer used by tests and server-side frame generation.
///
/// Frames are still validated so invalid geometry surfaces without a real
/// drawing surface.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_command_count: usize,
    pub last_circle_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_command_count = frame.commands.len();
        self.last_circle_count = frame
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Circle(_)))
            .count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
