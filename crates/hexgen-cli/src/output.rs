//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use hexgen_core::application::{EntityPlan, GenerationReport, SkipNote};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !console::colors_enabled(),
            term: Term::stdout(),
        }
    }
    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode; errors
    /// must always be visible.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Dimmed detail line, indented under the previous message.
    pub fn detail(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("    {msg}")
        } else {
            format!("    {}", msg.dimmed())
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout.  Written even in quiet mode so that scripts
    /// piping `--output-format json` always get a document.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// `true` if machine-readable output was requested.
    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    // ── Summaries ─────────────────────────────────────────────────────────

    /// Run summary after `hexgen generate`.
    pub fn report(&self, report: &GenerationReport) -> io::Result<()> {
        if self.is_json() {
            return self.json(report);
        }
        self.success(&format!(
            "Generated {} {} at {}",
            report.project_name,
            report.project_version,
            report.project_root.display()
        ))?;
        self.detail(&format!(
            "{} specs, {} DTOs, {} operations, {} entities",
            report.spec_count, report.dto_count, report.operation_count, report.entity_count
        ))?;
        if !report.entities.is_empty() {
            self.detail(&format!("entities: {}", report.entities.join(", ")))?;
        }
        self.detail(&format!(
            "wired: {}",
            if report.wired_entities.is_empty() {
                "none".to_string()
            } else {
                report.wired_entities.join(", ")
            }
        ))?;
        let layers: Vec<String> = report
            .artifacts_by_layer
            .iter()
            .map(|(layer, count)| format!("{layer} {count}"))
            .collect();
        self.detail(&format!(
            "{} files written ({})",
            report.artifacts_written,
            layers.join(", ")
        ))?;
        self.skips("Rejected specs", &report.rejected_specs)?;
        self.skips("Skipped entities", &report.skipped_entities)?;
        for warning in &report.warnings {
            self.warning(warning)?;
        }
        Ok(())
    }

    /// Entity listing for `hexgen entities` and `hexgen generate --dry-run`.
    pub fn entities(
        &self,
        entities: &[EntityPlan],
        skipped: &[SkipNote],
        show_paths: bool,
    ) -> io::Result<()> {
        if self.is_json() {
            #[derive(Serialize)]
            struct Listing<'a> {
                entities: &'a [EntityPlan],
                skipped: &'a [SkipNote],
            }
            return self.json(&Listing { entities, skipped });
        }
        if entities.is_empty() {
            self.info("No entities found")?;
        } else {
            self.header(&format!("Entities ({})", entities.len()))?;
        }
        for entity in entities {
            self.print(&format!("  {} ({})", entity.name, entity.service))?;
            if !entity.crud.is_empty() {
                self.detail(&format!("crud: {}", entity.crud.join(", ")))?;
            }
            if !entity.lookups.is_empty() {
                self.detail(&format!("lookups: {}", entity.lookups.join(", ")))?;
            }
            if show_paths {
                for path in entity.artifacts.values() {
                    self.detail(&path.display().to_string())?;
                }
            }
        }
        self.skips("Skipped", skipped)
    }

    fn skips(&self, title: &str, notes: &[SkipNote]) -> io::Result<()> {
        if notes.is_empty() {
            return Ok(());
        }
        self.warning(&format!("{title} ({})", notes.len()))?;
        for note in notes {
            self.detail(&format!("{}: {}", note.subject, note.reason))?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
