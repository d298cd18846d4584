#[derive(Debug, PartialEq)]
pub enum InputMode {
    Normal,
    EditingPath,
    EditingCommand,
}

pub trait AppController {
    fn update(&mut self, action: super::tui::Action);
    fn render(&mut self, f: &mut ratatui::Frame);
    fn should_quit(&self) -> bool;
}
