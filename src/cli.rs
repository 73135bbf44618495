// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! One-shot commands that drive the same screen controller as the terminal
//! UI:
//! - Taking a photo
//! - Printing the current position
//! - Showing the configuration
//!
//! Permission prompts are asked on stdin.

use camloc::app::{AppModel, AppRuntime, CameraGate, Diagnostic, Message};
use camloc::backends::{
    Capability, PermissionPrompt, PermissionPrompter, PermissionResponse, PermissionStatus,
};
use camloc::config::Config;
use camloc::constants::LocationAccuracy;
use camloc::errors::{AppError, AppResult, CameraError, LocationError};
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Request camera access, capture one photo and print its URI
pub fn take_photo(mut config: Config, output: Option<PathBuf>) -> AppResult<()> {
    if let Some(dir) = output {
        config.photo_dir = Some(dir);
    }

    block_on(async move {
        let mut app = start(&config);

        app.dispatch(Message::AccessCamera);
        settle_or_interrupt(&mut app).await?;

        if app.model().camera_gate() == CameraGate::Blocked {
            return Err(AppError::PermissionDenied(Capability::Camera));
        }
        if app.model().camera_handle().is_none() {
            return Err(diagnostic_error(app.model())
                .unwrap_or(AppError::Camera(CameraError::NoCameraHandle)));
        }

        app.dispatch(Message::TakePhoto);
        settle_or_interrupt(&mut app).await?;

        let photo = app.model().photo().ok_or_else(|| {
            diagnostic_error(app.model()).unwrap_or_else(|| {
                AppError::Camera(CameraError::CaptureFailed("no picture returned".into()))
            })
        })?;
        println!("{}", photo.uri);
        Ok(())
    })
}

/// Request location access and print the reading as JSON
pub fn locate(mut config: Config, accuracy: Option<LocationAccuracy>) -> AppResult<()> {
    if let Some(accuracy) = accuracy {
        config.location_accuracy = accuracy;
    }

    block_on(async move {
        let mut app = start(&config);

        app.dispatch(Message::AccessLocation);
        settle_or_interrupt(&mut app).await?;

        if app.model().location_permission() == PermissionStatus::Denied {
            return Err(AppError::PermissionDenied(Capability::Location));
        }
        let reading = app.model().location().ok_or_else(|| {
            diagnostic_error(app.model()).unwrap_or_else(|| {
                LocationError::Unavailable("no position returned".into()).into()
            })
        })?;
        println!("{}", serde_json::to_string_pretty(reading)?);
        Ok(())
    })
}

/// Print the effective configuration, optionally writing the defaults first
pub fn show_config(config: &Config, path: Option<PathBuf>, init: bool) -> AppResult<()> {
    if init {
        let path = path
            .as_ref()
            .ok_or_else(|| AppError::Config("no config directory on this platform".into()))?;
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            Config::default().save_to(path)?;
            println!("Wrote default config: {}", path.display());
        }
    }

    match &path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config file)"),
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn start(config: &Config) -> AppRuntime {
    let (prompter, prompts) = PermissionPrompter::channel();
    tokio::spawn(answer_prompts_on_stdin(prompts));
    AppRuntime::new(AppModel::from_config(config, prompter))
}

fn block_on<T>(future: impl Future<Output = AppResult<T>>) -> AppResult<T> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::Other(format!("Failed to start async runtime: {}", e)))?;
    let result = runtime.block_on(future);
    // A stdin read may still be pending after Ctrl+C
    runtime.shutdown_background();
    result
}

async fn settle_or_interrupt(app: &mut AppRuntime) -> AppResult<()> {
    tokio::select! {
        _ = app.settle() => Ok(()),
        _ = tokio::signal::ctrl_c() => Err(AppError::Other("Interrupted".into())),
    }
}

fn diagnostic_error(model: &AppModel) -> Option<AppError> {
    match model.last_diagnostic()? {
        Diagnostic::LocationPermissionDenied => {
            Some(AppError::PermissionDenied(Capability::Location))
        }
        Diagnostic::LocationUnavailable(msg) => {
            Some(AppError::Location(LocationError::Unavailable(msg.clone())))
        }
        Diagnostic::CameraUnavailable(msg) => Some(AppError::Camera(
            CameraError::InitializationFailed(msg.clone()),
        )),
        Diagnostic::CaptureFailed(msg) => {
            Some(AppError::Camera(CameraError::CaptureFailed(msg.clone())))
        }
    }
}

async fn answer_prompts_on_stdin(mut prompts: mpsc::UnboundedReceiver<PermissionPrompt>) {
    while let Some(prompt) = prompts.recv().await {
        let question = prompt.message();
        let granted = tokio::task::spawn_blocking(move || ask_yes_no(&question))
            .await
            .unwrap_or(false);
        prompt.respond(if granted {
            PermissionResponse::Granted
        } else {
            PermissionResponse::Denied
        });
    }
}

fn ask_yes_no(question: &str) -> bool {
    eprint!("{} [y/N] ", question);
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
