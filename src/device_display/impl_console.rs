use crate::device_display::interface::DeviceDisplay;
use std::error::Error;

const LINE_WIDTH: usize = 40;

pub struct DeviceDisplayConsole {
    display_buffer: Vec<String>,
}

impl DeviceDisplayConsole {
    pub fn new(num_lines: u8) -> Self {
        Self {
            display_buffer: vec![String::new(); num_lines as usize],
        }
    }

    fn render_display(&self) {
        println!("┌{}┐", "─".repeat(LINE_WIDTH));
        for line in &self.display_buffer {
            println!("│{:<width$}│", line, width = LINE_WIDTH);
        }
        println!("└{}┘", "─".repeat(LINE_WIDTH));
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.render_display();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        for line in &mut self.display_buffer {
            line.clear();
        }
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if line as usize >= self.display_buffer.len() {
            return Err("Invalid line number".into());
        }

        let truncated: String = text.chars().take(LINE_WIDTH).collect();
        self.display_buffer[line as usize] = truncated;

        self.render_display();
        Ok(())
    }

    fn num_lines(&self) -> u8 {
        self.display_buffer.len() as u8
    }
}
