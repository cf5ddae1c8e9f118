// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod terminal;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use jansite_app::{EstimateInput, FormPayload, Product, SiteCommand, SiteState, apply_events};
use std::env;
use std::io;
use std::path::PathBuf;
use terminal::TerminalSurface;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("JANSITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `jansite --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    let mut state = SiteState::new(&config.site_config()).with_context(|| {
        format!(
            "invalid [whatsapp] config in {}; fix the recipient number",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        return Ok(());
    }

    let command = options
        .command
        .ok_or_else(|| anyhow!("no command given; run with --help to see supported commands"))?;

    let stdout = io::stdout();
    let mut surface = TerminalSurface::new(stdout.lock());
    match command {
        Command::Products => {
            for product in Product::ALL {
                surface.line(&product_row(product))?;
            }
            Ok(())
        }
        Command::Estimate if options.json => {
            let estimate = EstimateInput::from_form(&options.fields).estimate();
            let json = serde_json::to_string_pretty(&estimate).context("encode estimate")?;
            surface.line(&json)
        }
        Command::Estimate => {
            let events = state.dispatch(SiteCommand::RecalculateEstimate(options.fields.clone()));
            apply_events(&mut surface, &events)?;
            let events = state.dispatch(SiteCommand::SubmitEstimate(options.fields));
            apply_events(&mut surface, &events)
        }
        Command::Lead => {
            let message = state.template().build(&options.intent, &options.fields);
            surface.line(&format!("{message}\n"))?;
            let events = state.dispatch(SiteCommand::SubmitLead {
                intent: options.intent,
                success_id: None,
                payload: options.fields,
            });
            apply_events(&mut surface, &events)
        }
    }
}

fn product_row(product: Product) -> String {
    let motor = if product.is_motorized() {
        "  (motor included)"
    } else {
        ""
    };
    format!(
        "{:<24} {:>4} AED/sqm  {}{motor}",
        product.as_str(),
        product.rate_aed(),
        product.label()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Estimate,
    Lead,
    Products,
}

impl Command {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "estimate" => Some(Self::Estimate),
            "lead" => Some(Self::Lead),
            "products" => Some(Self::Products),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    command: Option<Command>,
    fields: FormPayload,
    intent: String,
    json: bool,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        command: None,
        fields: FormPayload::new(),
        intent: "default".to_owned(),
        json: false,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };
    let mut intent_set = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--intent" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--intent requires a tag such as booking or contact"))?;
                options.intent = value.as_ref().to_owned();
                intent_set = true;
            }
            "--json" => {
                options.json = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            flag if flag.starts_with('-') => {
                bail!("unknown argument {flag:?}; run with --help to see supported options");
            }
            word if options.command.is_none() => {
                options.command = Some(Command::parse(word).ok_or_else(|| {
                    anyhow!(
                        "unknown command {word:?}; expected one of: estimate, lead, products"
                    )
                })?);
            }
            assignment => {
                let (key, value) = FormPayload::parse_assignment(assignment)?;
                options.fields.push(key, value);
            }
        }
    }

    if options.json && options.command != Some(Command::Estimate) {
        bail!("--json only applies to the estimate command");
    }
    if intent_set && options.command != Some(Command::Lead) {
        bail!("--intent only applies to the lead command");
    }
    if options.command == Some(Command::Products) && !options.fields.is_empty() {
        bail!("the products command takes no fields");
    }

    Ok(options)
}

fn print_help() {
    println!("jansite: curtain and blind estimates with WhatsApp handoff");
    println!("  estimate [--json] name=value...     Price a window and print the WhatsApp link");
    println!("  lead [--intent <tag>] name=value... Print a lead message and its WhatsApp link");
    println!("  products                            List products and rates");
    println!();
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
    println!();
    println!("Estimate fields: width_cm height_cm product rooms motorized=on express_delivery=on");
    println!("                 full_name phone location notes");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, Command, parse_cli_args, product_row};
    use anyhow::Result;
    use jansite_app::{FormPayload, Product};
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/jansite-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                command: None,
                fields: FormPayload::new(),
                intent: "default".to_owned(),
                json: false,
                print_config_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_collects_estimate_fields_in_order() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "estimate",
                "width_cm=200",
                "height_cm=150",
                "product=sheer_curtains",
                "express_delivery=on",
                "--json",
            ],
            default_options_path(),
        )?;
        assert_eq!(options.command, Some(Command::Estimate));
        assert!(options.json);
        let keys: Vec<_> = options.fields.iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            vec!["width_cm", "height_cm", "product", "express_delivery"]
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_lead_intent() -> Result<()> {
        let options = parse_cli_args(
            vec!["lead", "--intent", "booking", "full_name=Sara"],
            default_options_path(),
        )?;
        assert_eq!(options.command, Some(Command::Lead));
        assert_eq!(options.intent, "booking");
        assert_eq!(options.fields.get("full_name"), Some("Sara"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml", "products"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        assert_eq!(options.command, Some(Command::Products));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_flag_values() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(vec!["lead", "--intent"], default_options_path())
            .expect_err("missing intent value should fail");
        assert!(error.to_string().contains("--intent requires a tag"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument_and_command() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));

        let error = parse_cli_args(vec!["quote"], default_options_path())
            .expect_err("unknown command should fail");
        assert!(error.to_string().contains("unknown command"));
    }

    #[test]
    fn parse_cli_args_rejects_bare_field_without_equals() {
        let error = parse_cli_args(vec!["estimate", "200"], default_options_path())
            .expect_err("bare value should fail");
        assert!(error.to_string().contains("name=value"));
    }

    #[test]
    fn parse_cli_args_rejects_flags_for_other_commands() {
        let error = parse_cli_args(vec!["lead", "--json"], default_options_path())
            .expect_err("json is estimate-only");
        assert!(error.to_string().contains("--json only applies"));

        let error = parse_cli_args(
            vec!["estimate", "--intent", "booking"],
            default_options_path(),
        )
        .expect_err("intent is lead-only");
        assert!(error.to_string().contains("--intent only applies"));

        let error = parse_cli_args(vec!["products", "rooms=2"], default_options_path())
            .expect_err("products takes no fields");
        assert!(error.to_string().contains("takes no fields"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn product_rows_flag_motorized_variants() {
        let row = product_row(Product::MotorizedBlinds);
        assert!(row.starts_with("motorized_blinds"));
        assert!(row.contains(" 464 AED/sqm"));
        assert!(row.ends_with("(motor included)"));
        assert!(!product_row(Product::SheerCurtains).contains("motor included"));
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
