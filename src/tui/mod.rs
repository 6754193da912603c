//! Ratatui-based terminal UI.
//!
//! Browses the five diagnostic charts, shows the current estimates in a header,
//! and lets the log-ratio candidate filter be toggled live.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{AnalysisOutput, run_analysis};
use crate::domain::{AnalysisConfig, CandidateFilter};
use crate::error::AppError;
use crate::plot::{Chart, diagnostic_charts};

mod plotters_chart;

use plotters_chart::{DiagnosticPlottersChart, PALETTE};

/// Start the TUI.
pub fn run(config: AnalysisConfig) -> Result<(), AppError> {
    let mut app = App::new(config)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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
    config: AnalysisConfig,
    run: AnalysisOutput,
    charts: Vec<Chart>,
    selected: usize,
    status: String,
}

impl App {
    fn new(config: AnalysisConfig) -> Result<Self, AppError> {
        let run = run_analysis(&config)?;
        let charts = diagnostic_charts(&run);
        Ok(Self {
            config,
            run,
            charts,
            selected: 0,
            status: "Ready.".to_string(),
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
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

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        let n = self.charts.len().max(1);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                self.selected = (self.selected + 1) % n;
            }
            KeyCode::Left | KeyCode::Up | KeyCode::BackTab => {
                self.selected = (self.selected + n - 1) % n;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if idx < n {
                    self.selected = idx;
                }
            }
            KeyCode::Char('f') => {
                self.config.filter = next_filter(self.config.filter);
                self.refresh()?;
                self.status = format!("filter: {:?}", self.config.filter);
            }
            _ => {}
        }
        Ok(false)
    }

    fn refresh(&mut self) -> Result<(), AppError> {
        self.run = run_analysis(&self.config)?;
        self.charts = diagnostic_charts(&self.run);
        self.selected = self.selected.min(self.charts.len().saturating_sub(1));
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let full = &self.run.full_derivative.params;
        let recent = &self.run.recent_derivative.params;
        let fits = self
            .run
            .log_ratio
            .fits
            .iter()
            .map(|f| format!("K={} r={:.5}", f.k, f.params.r))
            .collect::<Vec<_>>()
            .join("  ");

        let lines = vec![
            Line::from(vec![
                Span::styled("logfit", Style::default().fg(Color::Cyan)),
                Span::raw(" | logistic growth, U.S. census 1790-1990"),
            ]),
            Line::from(Span::styled(
                format!(
                    "derivative: r={:.5} K={:.2} | recent: r={:.5} K={:.2}",
                    full.r, full.k, recent.r, recent.k
                ),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!("log-ratio: {fits}"),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_legend(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(chart) = self.charts.get(self.selected) else {
            return;
        };
        let title = format!("[{}/{}] {}", self.selected + 1, self.charts.len(), chart.title);
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some((x_bounds, y_bounds)) = chart.bounds() else {
            let msg = Paragraph::new("No data for this chart.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };
        let pad = ((y_bounds[1] - y_bounds[0]).abs() * 0.05).max(1e-12);
        let widget = DiagnosticPlottersChart {
            chart,
            x_bounds,
            y_bounds: [y_bounds[0] - pad, y_bounds[1] + pad],
        };
        frame.render_widget(widget, inner);
    }

    fn draw_legend(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .charts
            .get(self.selected)
            .map(|chart| {
                chart
                    .series
                    .iter()
                    .enumerate()
                    .map(|(i, s)| {
                        let c = PALETTE[i % PALETTE.len()];
                        ListItem::new(Line::from(vec![
                            Span::styled("■ ", Style::default().fg(Color::Rgb(c.0, c.1, c.2))),
                            Span::raw(s.label.clone()),
                        ]))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let list = List::new(items).block(Block::default().title("Legend").borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ chart  1-5 jump  f filter  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn next_filter(cur: CandidateFilter) -> CandidateFilter {
    match cur {
        CandidateFilter::ExceedsMaximum => CandidateFilter::PointMask,
        CandidateFilter::PointMask => CandidateFilter::ExceedsMaximum,
    }
}
