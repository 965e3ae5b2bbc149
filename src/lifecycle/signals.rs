//! OS signal handling.
//!
//! SIGINT and SIGTERM both stop the daemon immediately. In-flight
//! transactions are abandoned; the chain decides whether they land.

/// Signal that ended the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    Interrupt,
    Terminate,
}

impl std::fmt::Display for ExitSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitSignal::Interrupt => write!(f, "SIGINT"),
            ExitSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Wait for SIGINT or SIGTERM.
pub async fn wait_for_exit_signal() -> std::io::Result<ExitSignal> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.map(|_| ExitSignal::Interrupt),
            _ = terminate.recv() => Ok(ExitSignal::Terminate),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map(|_| ExitSignal::Interrupt)
    }
}
