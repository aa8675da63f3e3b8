//! Ratatui-based terminal UI.
//!
//! The TUI presents the reaction tables as a navigable list, renders the
//! selected fit's curve on log-log axes and shows its provenance text.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::cli::TuiArgs;
use crate::data::{Product, ReactionDatabase};
use crate::error::FitError;
use crate::fit::{CrossSectionFit, GridSpec};
use crate::plot::{log_log_bounds, sampled_series, CurveSeries};

mod plotters_chart;

use plotters_chart::XsPlottersChart;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), FitError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FitError::Io(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args.points.max(2))?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, FitError> {
        enable_raw_mode().map_err(|e| FitError::Io(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(FitError::Io(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    db: ReactionDatabase,
    /// Labels visible under the current product filter, in table order.
    visible: Vec<String>,
    selected: usize,
    /// `None` shows every product group.
    filter: Option<Product>,
    grid_points: usize,
    series: Option<CurveSeries>,
    status: String,
}

impl App {
    fn new(grid_points: usize) -> Result<Self, FitError> {
        let db = ReactionDatabase::load()?;
        let mut app = Self {
            db,
            visible: Vec::new(),
            selected: 0,
            filter: None,
            grid_points,
            series: None,
            status: String::new(),
        };
        app.refresh_visible();
        app.resample()?;
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), FitError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| FitError::Io(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| FitError::Io(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| FitError::Io(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, FitError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.resample()?;
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < self.visible.len() {
                    self.selected += 1;
                    self.resample()?;
                }
            }
            KeyCode::Left => {
                self.filter = prev_filter(self.filter);
                self.refresh_visible();
                self.resample()?;
            }
            KeyCode::Right => {
                self.filter = next_filter(self.filter);
                self.refresh_visible();
                self.resample()?;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.grid_points = (self.grid_points * 2).min(100_000);
                self.resample()?;
                self.status = format!("grid points: {}", self.grid_points);
            }
            KeyCode::Char('-') => {
                self.grid_points = (self.grid_points / 2).max(2);
                self.resample()?;
                self.status = format!("grid points: {}", self.grid_points);
            }
            _ => {}
        }
        Ok(false)
    }

    fn refresh_visible(&mut self) {
        self.visible = match self.filter {
            Some(product) => self
                .db
                .by_product(product)
                .map(|r| r.label().to_string())
                .collect(),
            None => self.db.labels().map(str::to_string).collect(),
        };
        self.selected = self.selected.min(self.visible.len().saturating_sub(1));
    }

    fn resample(&mut self) -> Result<(), FitError> {
        let Some(label) = self.visible.get(self.selected).cloned() else {
            self.series = None;
            self.status = "No reactions under this filter.".to_string();
            return Ok(());
        };
        let points = self.grid_points;
        let Some(reaction) = self.db.get_mut(&label) else {
            self.series = None;
            return Ok(());
        };
        let fit = reaction.fit_mut();
        fit.set_grid(GridSpec::Count(points))?;
        self.series = Some(sampled_series(label.clone(), fit)?);
        self.status = label;
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let filter_label = self
            .filter
            .map(|p| format!("fast {}", p.label()))
            .unwrap_or_else(|| "all products".to_string());
        let line = Line::from(vec![
            Span::styled("xs", Style::default().fg(Color::Cyan)),
            Span::raw(" — cross-section fits for hydrogen projectiles on H2 | "),
            Span::styled(
                format!("{filter_label} | {} reactions", self.visible.len()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(Text::from(vec![line])).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        self.draw_reaction_list(frame, columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(9)])
            .split(columns[1]);

        self.draw_chart(frame, right[0]);
        self.draw_description(frame, right[1]);
    }

    fn draw_reaction_list(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|label| ListItem::new(label.clone()))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Reactions").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        if !self.visible.is_empty() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Cross section").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(series) = &self.series else {
            let msg = Paragraph::new("No curve to draw.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let slice = std::slice::from_ref(series);
        let Some((x_bounds, y_bounds)) = log_log_bounds(slice) else {
            let msg = Paragraph::new("No finite positive points to draw.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let widget = XsPlottersChart {
            curve: &series.points,
            x_bounds,
            y_bounds,
            x_label: "E (eV)",
            y_label: "sigma (m^2)",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_description(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let text = self
            .visible
            .get(self.selected)
            .and_then(|label| self.db.get(label))
            .map(|r| crate::report::format_reaction_detail(r))
            .unwrap_or_else(|| "No reaction selected.".to_string());

        let p = Paragraph::new(text)
            .block(Block::default().title("Provenance").borders(Borders::ALL))
            .wrap(ratatui::widgets::Wrap { trim: false });
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ product filter  +/- grid points  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Cycle all -> H+ -> H -> H- -> H2+ -> H2 -> H3+ -> all.
fn next_filter(current: Option<Product>) -> Option<Product> {
    match current {
        None => Some(Product::ALL[0]),
        Some(p) => {
            let i = Product::ALL.iter().position(|q| *q == p).unwrap_or(0);
            Product::ALL.get(i + 1).copied()
        }
    }
}

fn prev_filter(current: Option<Product>) -> Option<Product> {
    match current {
        None => Some(Product::ALL[Product::ALL.len() - 1]),
        Some(p) => {
            let i = Product::ALL.iter().position(|q| *q == p).unwrap_or(0);
            if i == 0 {
                None
            } else {
                Some(Product::ALL[i - 1])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_filter_cycles_through_all_and_back() {
        let mut filter = None;
        for expected in Product::ALL {
            filter = next_filter(filter);
            assert_eq!(filter, Some(expected));
        }
        assert_eq!(next_filter(filter), None);

        assert_eq!(prev_filter(None), Some(Product::H3Plus));
        assert_eq!(prev_filter(Some(Product::HPlus)), None);
    }
}
