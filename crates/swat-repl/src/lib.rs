//! swat REPL — interactive front end for the swat kernel.
//!
//! Each line is either a meta-command (starting with `/`) handled here, or
//! a pipeline handed to [`Kernel::execute`]. The kernel is async; the REPL
//! drives it from a current-thread tokio runtime so the line editor can
//! stay synchronous.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::runtime::Runtime;

use swat_kernel::{ExecResult, Kernel, KernelConfig, LoadOutcome, paths};

/// REPL configuration and state.
pub struct Repl {
    runtime: Runtime,
    kernel: Kernel,
    outcome: LoadOutcome,
    color: bool,
    quit: bool,
}

impl Repl {
    /// Create a REPL over a transient kernel.
    pub fn new() -> Result<Self> {
        Self::with_config(KernelConfig::transient())
    }

    /// Create a REPL over a kernel built from `config`, loading its state.
    pub fn with_config(config: KernelConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;
        let kernel = Kernel::new(config)?;
        let outcome = runtime.block_on(kernel.initialize())?;
        tracing::debug!(kernel = kernel.name(), ?outcome, "kernel ready");

        Ok(Self {
            runtime,
            kernel,
            outcome,
            color: false,
            quit: false,
        })
    }

    /// Colorize stderr and exit codes in formatted output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// True once `/quit` has been entered.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// What the kernel found in storage at startup.
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// The kernel behind this REPL.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Run a pipeline and return the raw result.
    pub fn execute(&self, line: &str) -> ExecResult {
        self.runtime.block_on(self.kernel.execute(line))
    }

    /// Process a single line of input.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>> {
        let trimmed = line.trim();

        // Handle meta-commands
        if trimmed.starts_with('/') {
            return self.handle_meta_command(trimmed);
        }

        if trimmed.is_empty() {
            return Ok(None);
        }

        let result = self.execute(trimmed);
        let output = format_result(&result, self.color);
        Ok(if output.is_empty() { None } else { Some(output) })
    }

    /// Handle a meta-command (starts with /).
    fn handle_meta_command(&mut self, cmd: &str) -> Result<Option<String>> {
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        let command = parts.first().copied().unwrap_or("");

        match command {
            "/quit" | "/q" | "/exit" => {
                self.quit = true;
                Ok(None)
            }
            "/help" | "/h" | "/?" => Ok(Some(HELP_TEXT.to_string())),
            "/tools" => {
                let names = self.runtime.block_on(self.kernel.tool_names());
                Ok(Some(names.join(" ")))
            }
            "/history" => {
                let history = self.runtime.block_on(self.kernel.history())?;
                if history.is_empty() {
                    return Ok(Some("(no history)".to_string()));
                }
                let lines: Vec<String> = history
                    .iter()
                    .enumerate()
                    .map(|(i, line)| format!("{:>5}  {line}", i + 1))
                    .collect();
                Ok(Some(lines.join("\n")))
            }
            "/dump" => {
                let state = self.runtime.block_on(self.kernel.vfs().snapshot())?;
                let json = serde_json::to_string_pretty(&state).context("Failed to serialize state")?;
                Ok(Some(json))
            }
            "/reset" => {
                self.runtime.block_on(self.kernel.reset())?;
                Ok(Some("State cleared.".to_string()))
            }
            _ => Ok(Some(format!(
                "Unknown command: {}\nType /help for available commands.",
                command
            ))),
        }
    }
}

/// Format an ExecResult for display.
///
/// stdout is shown as-is, stderr on its own line, and a non-zero exit code
/// as a trailing `[exit N]`.
pub fn format_result(result: &ExecResult, color: bool) -> String {
    let mut output = result.out.trim_end_matches('\n').to_string();

    let mut push_line = |line: String| {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&line);
    };

    if !result.err.is_empty() {
        let err = result.err.trim_end_matches('\n');
        push_line(if color { err.red().to_string() } else { err.to_string() });
    }
    if !result.ok() {
        let status = format!("[exit {}]", result.code);
        push_line(if color { status.dimmed().to_string() } else { status });
    }

    output
}

const HELP_TEXT: &str = r#"swat REPL

Meta-commands:
  /help, /h, /?     Show this help
  /quit, /q, /exit  Exit the REPL
  /tools            List registered tools
  /history          Show command history
  /dump             Print the filesystem state as JSON
  /reset            Clear all files, history and cwd

Pipelines:
  cmd args...               Run a tool
  a | b | c                 Pipe stdout of each stage into the next
  cmd > path, cmd >> path   Write or append output (single stage only)

Examples:
  write /notes/todo.txt buy milk
  cat /notes/todo.txt | upper
  ls -l /notes
  help
"#;

/// Run the REPL against the persistent kernel called `name`.
pub fn run(name: &str) -> Result<()> {
    let mut repl = Repl::with_config(KernelConfig::persistent(name))?;
    repl.set_color(std::io::IsTerminal::is_terminal(&std::io::stdout()));

    if let LoadOutcome::Degraded { reason } = repl.load_outcome() {
        eprintln!("warning: stored state was unreadable ({reason}); starting empty");
    }

    println!("swat v{} (kernel '{}')", env!("CARGO_PKG_VERSION"), repl.kernel.name());
    println!("Type /help for commands, /quit to exit.\n");

    let mut rl = DefaultEditor::new().context("Failed to create editor")?;

    let history_path = paths::repl_history_file();
    if let Err(e) = rl.load_history(&history_path) {
        tracing::debug!(path = %history_path.display(), error = %e, "no line history loaded");
    }

    loop {
        match rl.readline("swat> ") {
            Ok(line) => {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    tracing::debug!(error = %e, "failed to add history entry");
                }

                match repl.process_line(&line) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) => eprintln!("Error: {:#}", e),
                }
                if repl.should_quit() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(parent) = history_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(path = %parent.display(), error = %e, "cannot create data directory");
        }
    }
    if let Err(e) = rl.save_history(&history_path) {
        tracing::warn!(path = %history_path.display(), error = %e, "failed to save line history");
    }

    Ok(())
}
