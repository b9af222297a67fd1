// ============================================================================
// 2D RENDERING SURFACE
// ============================================================================

use crate::config::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Immediate-mode 2D drawing context.
///
/// Styling is ambient: color, width and cap set here apply to every
/// following `stroke`/`fill` until changed or restored.
pub trait Surface {
    fn clear(&mut self);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Clockwise arc around `(cx, cy)`, joined to the current point if any.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
}

// ============================================================================
// RECORDING SURFACE
// ============================================================================

/// One recorded `Surface` call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Stroke,
    Fill,
    StrokeColor(Color),
    FillColor(Color),
    LineWidth(f64),
    LineCap(LineCap),
    Save,
    Restore,
    Translate {
        x: f64,
        y: f64,
    },
    Rotate(f64),
}

/// Surface that only records what was asked of it.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for CommandRecorder {
    fn clear(&mut self) {
        self.add_command(DrawCommand::Clear);
    }

    fn begin_path(&mut self) {
        self.add_command(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.add_command(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.add_command(DrawCommand::LineTo { x, y });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.add_command(DrawCommand::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        self.add_command(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.add_command(DrawCommand::Fill);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.add_command(DrawCommand::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.add_command(DrawCommand::FillColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.add_command(DrawCommand::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.add_command(DrawCommand::LineCap(cap));
    }

    fn save(&mut self) {
        self.add_command(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.add_command(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.add_command(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, angle: f64) {
        self.add_command(DrawCommand::Rotate(angle));
    }
}
