//! Ratatui-based terminal UI.
//!
//! The TUI renders the five-field prediction form. Arrow keys move between
//! fields and cycle their values, Enter submits the current profile for
//! prediction, and the result is shown as the success message, an echo of
//! the submitted values, and a two-bar chart against the fixed reference
//! score.
//!
//! The model is loaded and validated **before** the terminal enters raw
//! mode (see `app::handle_form`), so startup failures never leave a broken
//! terminal behind.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{self, ModelHandle, RunOutput};
use crate::domain::{
    CHART_Y_MAX, FieldKind, PredictionFile, REFERENCE_SCORE, RunConfig, StudentProfile,
};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::ScoreBarChart;

/// Start the form TUI with an already-loaded model.
pub fn run(config: RunConfig, handle: ModelHandle) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config, handle);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!(
                "Failed to enter alternate screen: {e}"
            )));
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
    config: RunConfig,
    handle: ModelHandle,
    profile: StudentProfile,
    selected_field: usize,
    run: Option<RunOutput>,
    status: String,
}

impl App {
    fn new(config: RunConfig, handle: ModelHandle) -> Self {
        Self {
            config,
            handle,
            profile: StudentProfile::default(),
            selected_field: 0,
            run: None,
            status: "Preencha os campos e pressione Enter para prever.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
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
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FieldKind::ALL.len() - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => self.submit(),
            KeyCode::Char('s') => self.save_prediction(),
            _ => {}
        }

        Ok(false)
    }

    fn adjust_field(&mut self, delta: isize) {
        let field = FieldKind::ALL[self.selected_field];
        self.profile.cycle(field, delta);
        // A changed selection invalidates the previous result.
        self.run = None;
        self.status = format!(
            "{}: {}",
            field.prompt_label(),
            self.profile.value_label(field)
        );
    }

    fn submit(&mut self) {
        match pipeline::run_predict(&self.handle, &self.profile) {
            Ok(run) => {
                self.status = crate::report::format_success_line(run.score);
                self.run = Some(run);
            }
            Err(err) => {
                // Inference failures are visible but never end the session.
                self.run = None;
                self.status = format!("Erro na previsão: {err}");
            }
        }
    }

    fn save_prediction(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nenhuma previsão para salvar (pressione Enter primeiro).".to_string();
            return;
        };

        let prediction = PredictionFile {
            tool: "gradecast".to_string(),
            saved_at: chrono::Local::now().date_naive(),
            target: self.handle.regressor.meta().target.clone(),
            profile: run.profile,
            score: run.score,
            reference: REFERENCE_SCORE,
        };

        match crate::io::write_prediction_json(&self.config.export_path, &prediction) {
            Ok(()) => {
                self.status = format!(
                    "Previsão salva em: {}",
                    self.config.export_path.display()
                );
            }
            Err(err) => {
                self.status = format!("Falha ao salvar: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let meta = self.handle.regressor.meta();
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("gradecast", Style::default().fg(Color::Cyan)),
            Span::raw(" — Previsão de Rendimento Escolar"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "modelo: {} | alvo: {} | treinado: {} | colunas: {}",
                self.config.model_path.display(),
                meta.target,
                meta.trained_at,
                self.handle.plan.len(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let drift = self.handle.plan.drift();
        if drift.is_clean() {
            lines.push(Line::from(Span::styled(
                format!(
                    "r2={:.3} | rmse={:.2} | n={}",
                    meta.quality.r2, meta.quality.rmse, meta.quality.n
                ),
                Style::default().fg(Color::Gray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!(
                    "aviso: {} valor(es) do formulário sem coluna no esquema, {} coluna(s) nunca usadas",
                    drift.missing_columns.len(),
                    drift.unclaimed_columns.len(),
                ),
                Style::default().fg(Color::Yellow),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(52), Constraint::Min(0)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = FieldKind::ALL
            .iter()
            .map(|field| {
                ListItem::new(format!(
                    "{}: {}",
                    field.prompt_label(),
                    self.profile.value_label(*field)
                ))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Formulário").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(area);

        self.draw_result_panel(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_result_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Resultado").borders(Borders::ALL);

        let text = match &self.run {
            Some(run) => {
                let mut lines: Vec<Line> = Vec::new();
                lines.push(Line::from(Span::styled(
                    crate::report::format_success_line(run.score),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                for field in FieldKind::ALL {
                    lines.push(Line::from(format!(
                        "{}: {}",
                        field.prompt_label(),
                        run.profile.value_label(field)
                    )));
                }
                Text::from(lines)
            }
            None => Text::from(vec![
                Line::from("Nenhuma previsão ainda."),
                Line::from(""),
                Line::from("Ajuste os campos com ←/→ e pressione Enter."),
            ]),
        };

        let p = Paragraph::new(text).block(block);
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Comparação com a referência")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("O gráfico aparece após a primeira previsão.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = ScoreBarChart {
            predicted: run.score,
            reference: REFERENCE_SCORE,
            y_bounds: [0.0, CHART_Y_MAX],
            predicted_label: "prevista",
            reference_label: "referência",
            fmt_y: fmt_axis_y,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ campo  ←/→ valor  Enter prever  s salvar  q sair";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.0}")
}
