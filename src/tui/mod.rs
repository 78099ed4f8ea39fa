//! Ratatui-based terminal UI.
//!
//! The TUI provides an asset picker over the catalog, start/end date editing,
//! an events toggle, and renders the normalized comparison chart with
//! recession bands and event markers, plus per-asset total returns.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, RunOutput, SelectedAsset};
use crate::chart::palette_color;
use crate::cli::CompareArgs;
use crate::data::MarketClient;
use crate::domain::{refdata, DateRange};
use crate::error::AppError;
use crate::overlay::plan_overlays;
use crate::report::{NO_RETURN_MSG, NO_VALID_DATA_MSG};

mod plotters_chart;

use plotters_chart::ComparisonChart;

/// Start the TUI.
pub fn run(args: CompareArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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

/// One selectable row of the picker.
struct AssetRow {
    category: String,
    display_name: String,
    symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateField {
    Start,
    End,
}

struct App {
    client: MarketClient,
    rows: Vec<AssetRow>,
    selected: Vec<bool>,
    cursor: usize,
    range: DateRange,
    show_events: bool,
    editing: Option<DateField>,
    date_input: String,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: CompareArgs) -> Result<Self, AppError> {
        let client = MarketClient::new()?;
        let range = crate::app::range_from_args(&args);
        let show_events = args.show_events();

        let mut rows: Vec<AssetRow> = refdata::CATALOG
            .iter()
            .flat_map(|c| {
                c.assets.iter().map(|a| AssetRow {
                    category: c.name.to_string(),
                    display_name: a.display_name.to_string(),
                    symbol: a.symbol.to_string(),
                })
            })
            .collect();

        let mut initial = pipeline::resolve_selection(&args.assets, &args.categories)?;
        if initial.is_empty() {
            initial = vec![SelectedAsset::from_symbol(refdata::DEFAULT_SYMBOL)];
        }

        // Symbols outside the catalog become extra picker rows.
        for sel in &initial {
            if !rows.iter().any(|r| r.symbol == sel.symbol) {
                rows.push(AssetRow {
                    category: "Custom".to_string(),
                    display_name: sel.display_name.clone(),
                    symbol: sel.symbol.clone(),
                });
            }
        }

        let selected = rows
            .iter()
            .map(|r| initial.iter().any(|s| s.symbol == r.symbol))
            .collect();

        let mut app = Self {
            client,
            rows,
            selected,
            cursor: 0,
            range,
            show_events,
            editing: None,
            date_input: String::new(),
            status: "Fetching market data...".to_string(),
            run: None,
        };
        app.refresh();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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
        if self.editing.is_some() {
            return self.handle_date_edit(code);
        }

        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.rows.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.selected[self.cursor] = !self.selected[self.cursor];
                self.refresh();
            }
            KeyCode::Char('s') => {
                self.editing = Some(DateField::Start);
                self.date_input = self.range.start().to_string();
                self.status = "Editing start date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('e') => {
                self.editing = Some(DateField::End);
                self.date_input = self.range.end().to_string();
                self.status = "Editing end date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('v') => {
                self.show_events = !self.show_events;
                self.replan_overlays();
                self.status = format!(
                    "Historical events {}.",
                    if self.show_events { "shown" } else { "hidden" }
                );
            }
            KeyCode::Char('r') => {
                self.refresh();
            }
            KeyCode::Char('x') => {
                self.export_csv();
            }
            _ => {}
        }

        Ok(false)
    }

    fn handle_date_edit(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let field = self.editing.take();
                self.apply_date_input(field);
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn apply_date_input(&mut self, field: Option<DateField>) {
        let trimmed = self.date_input.trim();
        let date = match chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                self.status = format!("Invalid date '{trimmed}': {e}");
                return;
            }
        };

        // DateRange::new re-applies the floor/ceiling clamps and keeps
        // start <= end.
        self.range = match field {
            Some(DateField::Start) => DateRange::new(date, self.range.end()),
            Some(DateField::End) => DateRange::new(self.range.start(), date),
            None => self.range,
        };
        self.refresh();
    }

    fn selection(&self) -> Vec<SelectedAsset> {
        self.rows
            .iter()
            .zip(self.selected.iter())
            .filter(|&(_, &on)| on)
            .map(|(row, _)| SelectedAsset {
                symbol: row.symbol.clone(),
                display_name: row.display_name.clone(),
            })
            .collect()
    }

    /// Refetch everything for the current selection and range.
    fn refresh(&mut self) {
        let selection = self.selection();
        if selection.is_empty() {
            self.run = None;
            self.status = "No assets selected. Space toggles the highlighted asset.".to_string();
            return;
        }

        let run = pipeline::run_compare(
            &self.client,
            &selection,
            &self.range,
            self.show_events,
            |_| {},
        );

        self.status = if run.no_valid_selection() {
            NO_VALID_DATA_MSG.to_string()
        } else if run.skips.is_empty() {
            format!("Compared {} asset(s).", run.table.len())
        } else {
            format!(
                "Compared {} asset(s); {} skipped: {}",
                run.table.len(),
                run.skips.len(),
                run.skips
                    .iter()
                    .map(|s| s.symbol.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };
        self.run = Some(run);
    }

    /// Recompute overlay visibility without refetching (events toggle).
    fn replan_overlays(&mut self) {
        let show_events = self.show_events;
        if let Some(run) = &mut self.run {
            if let Some(max_value) = run.table.max_value() {
                run.overlays = plan_overlays(&run.range, max_value, show_events);
            }
        }
    }

    fn export_csv(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nothing to export yet.".to_string();
            return;
        };
        if run.no_valid_selection() {
            self.status = "Nothing to export: no valid data.".to_string();
            return;
        }

        let path = PathBuf::from(crate::io::default_export_name(run.range.end()));
        match crate::io::write_comparison_csv(&path, &run.table) {
            Ok(()) => self.status = format!("Wrote {}", path.display()),
            Err(err) => self.status = format!("Export failed: {err}"),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("fc", Style::default().fg(Color::Cyan)),
            Span::raw(" — normalized asset comparison (base 100)"),
        ]));

        let compared = self.run.as_ref().map(|r| r.table.len()).unwrap_or(0);
        let skipped = self.run.as_ref().map(|r| r.skips.len()).unwrap_or(0);
        lines.push(Line::from(Span::styled(
            format!(
                "period: {} → {} | compared: {compared} | skipped: {skipped} | events: {}",
                self.range.start(),
                self.range.end(),
                if self.show_events { "on" } else { "off" },
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(0)])
            .split(area);

        self.draw_picker(frame, chunks[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(9)])
            .split(chunks[1]);

        self.draw_chart(frame, right[0]);
        self.draw_returns(frame, right[1]);
    }

    fn draw_picker(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        // Palette index of each selected row, in selection (row) order, so
        // picker colors match the chart traces.
        let mut trace_idx = 0usize;
        let mut items: Vec<ListItem> = Vec::with_capacity(self.rows.len());
        let mut last_category = "";

        for (row, &on) in self.rows.iter().zip(self.selected.iter()) {
            let mark = if on { "[x]" } else { "[ ]" };
            let style = if on {
                let (r, g, b) = palette_color(trace_idx);
                trace_idx += 1;
                Style::default().fg(Color::Rgb(r, g, b))
            } else {
                Style::default()
            };

            let category = if row.category == last_category {
                "     ".to_string()
            } else {
                last_category = &row.category;
                format!("{:<5.5}", row.category)
            };

            items.push(ListItem::new(Line::from(vec![
                Span::styled(category, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::raw(mark.to_string()),
                Span::raw(" "),
                Span::styled(row.display_name.clone(), style),
            ])));
        }

        let list = List::new(items)
            .block(Block::default().title("Assets").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let spec = self
            .run
            .as_ref()
            .filter(|r| !r.no_valid_selection())
            .map(|r| crate::chart::assemble(&r.table, &r.overlays, &r.range));

        let title = spec.as_ref().map(|s| s.layout.title).unwrap_or("Comparison");
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(spec) = &spec else {
            let text = if self.run.is_some() {
                NO_VALID_DATA_MSG
            } else {
                "Waiting for data..."
            };
            let msg = Paragraph::new(text).style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        frame.render_widget(ComparisonChart { spec }, inner);
    }

    fn draw_returns(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Total return (%)")
            .borders(Borders::ALL);

        let Some(run) = self.run.as_ref().filter(|r| !r.no_valid_selection()) else {
            let p = Paragraph::new("-").block(block);
            frame.render_widget(p, area);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        if run.returns.is_empty() {
            lines.push(Line::from(Span::styled(
                NO_RETURN_MSG,
                Style::default().fg(Color::Yellow),
            )));
        }
        for (idx, (name, pct)) in run.returns.iter().enumerate() {
            let (r, g, b) = palette_color(idx);
            let sign_color = if *pct < 0.0 { Color::Red } else { Color::Green };
            lines.push(Line::from(vec![
                Span::styled(format!("{name:<30}"), Style::default().fg(Color::Rgb(r, g, b))),
                Span::styled(format!("{pct:>9.2}"), Style::default().fg(sign_color)),
            ]));
        }

        let p = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ move  Space toggle  s/e dates  v events  r refresh  x export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);

        if self.editing.is_some() {
            let hint = Paragraph::new(format!("Date: {}_", self.date_input))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }
}
