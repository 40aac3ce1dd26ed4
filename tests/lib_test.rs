//! Library integration tests.

use chatbot_cli::ScaffoldError;

#[test]
fn error_types_are_public() {
    let err = ScaffoldError::UnknownComponent {
        id: "claude".into(),
    };
    assert!(err.to_string().contains("claude"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> chatbot_cli::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use chatbot_cli::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["chatbot-cli", "add", "openai", "--owner", "acme", "--strict"]);

    if let Commands::Add(args) = cli.command {
        assert_eq!(args.component.as_deref(), Some("openai"));
        assert_eq!(args.owner.as_deref(), Some("acme"));
        assert!(args.strict);
    } else {
        panic!("Expected Add command");
    }
}

#[test]
fn builtin_registry_is_public() {
    let registry = chatbot_cli::registry::Registry::builtin().unwrap();
    assert!(registry.lookup("openai").is_some());
    assert!(registry.lookup("OpenAI").is_none());
}
