use std::error::Error;

/// Line-oriented operator status panel. One header line plus one line per
/// configured class.
pub trait DeviceDisplay: Send + Sync {
    /// Initialize the display hardware
    #[allow(dead_code)]
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Clear all text from the display
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a specific line on the display (0-based index)
    /// Returns error if the line number is out of range
    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Get the number of lines supported by this display
    #[allow(dead_code)]
    fn num_lines(&self) -> u8;
}
