use aqdash::app::App;
use aqdash::cli::{parse_args, run_cli_command, CliCommand, USAGE};
use aqdash::startup::{init_logging, DashboardConfig};
use aqdash::terminal::{setup_panic_hook, TerminalManager};
use aqdash::ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};

/// How long `--print` waits for both fetches when no request timeout is set.
const PRINT_SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("aqdash: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };
    if run_cli_command(&command) {
        return Ok(());
    }
    let (overrides, print_mode) = match command {
        CliCommand::Run(overrides) => (overrides, false),
        CliCommand::Print(overrides) => (overrides, true),
        CliCommand::Version | CliCommand::Help => return Ok(()),
    };

    let config = DashboardConfig::from_env()?.apply_overrides(&overrides)?;

    // Logging is best effort; the dashboard works without it
    if let Err(e) = init_logging(&config.log_file) {
        eprintln!("Warning: {}", e);
    }

    let runtime = tokio::runtime::Runtime::new()?;

    if print_mode {
        return runtime.block_on(print_once(config));
    }

    setup_panic_hook();
    let mut terminal_manager = TerminalManager::new()?;

    let result = runtime.block_on(async {
        let mut app = App::new(config);
        run_app(terminal_manager.terminal(), &mut app).await
    });

    // Restore before color_eyre prints any error report
    terminal_manager.restore();
    drop(terminal_manager);

    if let Err(ref e) = result {
        tracing::error!("Dashboard exited with error: {}", e);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;

    let mut tick = interval(app.config.tick_rate);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut refresh = app.config.refresh_interval.and_then(|every| {
        let Some(start) = Instant::now().checked_add(every) else {
            tracing::warn!("Refresh interval {:?} is out of range; auto-refresh is off", every);
            return None;
        };
        let mut timer = interval_at(start, every);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(timer)
    });

    let size = terminal.size()?;
    app.update_terminal_dimensions(size.width, size.height);
    app.start();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tick.tick() => {
                app.tick();
            }

            _ = async {
                match refresh.as_mut() {
                    Some(timer) => {
                        timer.tick().await;
                    }
                    None => futures::future::pending::<()>().await,
                }
            } => {
                app.refresh();
            }

            Some(msg) = message_rx.recv() => {
                app.handle_message(msg);
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => {
                        if app.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse),
                    Some(Ok(Event::Resize(width, height))) => {
                        app.update_terminal_dimensions(width, height);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    // Input closed
                    None => return Ok(()),
                }
            }
        }
    }
}

/// Fetch once, wait for both panels, print a single frame.
async fn print_once(config: DashboardConfig) -> Result<()> {
    let (width, height) = config.print_size;
    let settle_timeout = config
        .request_timeout
        .map(|t| t.saturating_add(Duration::from_secs(1)))
        .unwrap_or(PRINT_SETTLE_TIMEOUT);

    let mut app = App::new(config);
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;
    app.start();

    let settle = async {
        while !app.is_settled() {
            match message_rx.recv().await {
                Some(msg) => app.handle_message(msg),
                None => break,
            }
        }
    };
    if tokio::time::timeout(settle_timeout, settle).await.is_err() {
        tracing::warn!("Printing before all fetches settled ({:?})", settle_timeout);
    }

    let text = ui::render_to_string(&app.view(), &app.status(), width, height)?;
    print!("{}", text);
    Ok(())
}
