use anyhow::Result;
use serde::Serialize;
use std::env;

use crate::cli::{ColorArgs, OutputFormat};
use cli_support::cli_utils::{prefix, yes_no};
use cli_support::color::{
    native_provider, ColorCapability, ColorDecision, ColorStyle, Console, TerminalProvider,
    FORCE_COLOR, NO_COLOR, TERM,
};

#[derive(Debug, Serialize)]
struct ColorReport {
    no_color: Option<String>,
    force_color: Option<String>,
    term: Option<String>,
    stdout_is_terminal: bool,
    platform: &'static str,
    decision: ColorDecision,
    enabled: bool,
    styles: Vec<ColorStyle>,
}

pub fn run(args: ColorArgs) -> Result<()> {
    let provider = native_provider();
    let capability = ColorCapability::detect();
    let console = Console::from_capability(capability);

    let report = ColorReport {
        no_color: var(NO_COLOR),
        force_color: var(FORCE_COLOR),
        term: var(TERM),
        stdout_is_terminal: provider.stdout_is_terminal(),
        platform: provider.name(),
        decision: capability.decision(),
        enabled: capability.is_enabled(),
        styles: ColorStyle::ALL.to_vec(),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report, &console),
    }

    Ok(())
}

fn var(name: &str) -> Option<String> {
    env::var_os(name).map(|v| v.to_string_lossy().into_owned())
}

fn describe(value: &Option<String>) -> String {
    match value {
        Some(v) if v.is_empty() => "set (empty)".to_string(),
        Some(v) => format!("set ({v})"),
        None => "unset".to_string(),
    }
}

fn print_text(report: &ColorReport, console: &Console) {
    println!("{} {}", prefix(console), console.header("Color capability"));
    println!("  NO_COLOR:     {}", describe(&report.no_color));
    println!("  FORCE_COLOR:  {}", describe(&report.force_color));
    println!("  TERM:         {}", describe(&report.term));
    println!(
        "  stdout tty:   {}",
        yes_no(console, report.stdout_is_terminal)
    );
    println!("  platform:     {}", report.platform);
    println!("  decided by:   {}", decision_label(report.decision));
    println!("  color:        {}", yes_no(console, report.enabled));
    println!();
    println!("{}", console.header("Styles"));
    for style in &report.styles {
        println!(
            "  {:<7} {}",
            style.name(),
            console.colorize(&format!("{} text", style.name()), *style)
        );
    }
}

fn decision_label(decision: ColorDecision) -> &'static str {
    match decision {
        ColorDecision::NoColor => "NO_COLOR",
        ColorDecision::ForceColor => "FORCE_COLOR",
        ColorDecision::NotATerminal => "stdout is not a terminal",
        ColorDecision::Platform => "platform check",
        ColorDecision::Explicit => "explicit setting",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe(&None), "unset");
        assert_eq!(describe(&Some(String::new())), "set (empty)");
        assert_eq!(describe(&Some("1".into())), "set (1)");
    }

    #[test]
    fn test_report_serializes_decision() {
        let report = ColorReport {
            no_color: Some(String::new()),
            force_color: None,
            term: None,
            stdout_is_terminal: false,
            platform: "unix",
            decision: ColorDecision::NoColor,
            enabled: false,
            styles: vec![ColorStyle::Ok],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["decision"], "no_color");
        assert_eq!(json["styles"][0], "ok");
        assert_eq!(json["no_color"], "");
    }
}
