//! End-to-end library tests: registry, fetch, assembly and installation.

use std::fs;
use std::time::Duration;

use chatbot_cli::config::ProjectConfig;
use chatbot_cli::installer::Installer;
use chatbot_cli::registry::{Registry, Role};
use chatbot_cli::remote::{ContentFetcher, Endpoints, HttpRetriever, RetrieverConfig};
use chatbot_cli::template::Assembler;
use chatbot_cli::ScaffoldError;
use httpmock::prelude::*;
use tempfile::TempDir;

const REGISTRY: &str = r#"
components:
  - name: support
    repo: support-bot
    folder: Support
    paths:
      component: src/components
      hook: src/hooks/useSupport.ts
    dependencies: [react, react-markdown]
    env_vars: [SUPPORT_API_KEY]
    description: Support desk chatbot
"#;

fn fetcher(server: &MockServer) -> ContentFetcher {
    let retriever = HttpRetriever::with_config(RetrieverConfig {
        timeout: Duration::from_secs(5),
        ..RetrieverConfig::default()
    })
    .unwrap();
    ContentFetcher::new(retriever, Endpoints::single(server.base_url()))
}

fn mock_repo(server: &MockServer) {
    let window = server.url("/raw/Window.tsx");
    let provider = server.url("/raw/SupportProvider.tsx");
    let hook = server.url("/raw/useSupport.ts");

    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/support-bot/contents/src/components");
        then.status(200).json_body(serde_json::json!([
            { "name": "Window.tsx", "path": "src/components/Window.tsx",
              "type": "file", "download_url": window },
            { "name": "SupportProvider.tsx", "path": "src/components/SupportProvider.tsx",
              "type": "file", "download_url": provider },
        ]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/support-bot/contents/src/hooks/useSupport.ts");
        then.status(200).json_body(serde_json::json!({
            "name": "useSupport.ts", "path": "src/hooks/useSupport.ts",
            "type": "file", "download_url": hook,
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/raw/Window.tsx");
        then.status(200)
            .body("type Props = { open: boolean };\nexport function Window(props: Props) { return null; }\n");
    });
    server.mock(|when, then| {
        when.method(GET).path("/raw/SupportProvider.tsx");
        then.status(200).body("export const SupportProvider = () => null;\n");
    });
    server.mock(|when, then| {
        when.method(GET).path("/raw/useSupport.ts");
        then.status(200)
            .body("export const useSupport = (id: string): string => id;\n");
    });
}

#[test]
fn assembles_and_installs_javascript_project() {
    let server = MockServer::start();
    mock_repo(&server);

    let registry = Registry::from_yaml(REGISTRY).unwrap();
    let fetcher = fetcher(&server);
    let template = Assembler::new(&registry, &fetcher)
        .with_env_owner(None)
        .with_owner(Some("acme".to_string()))
        .assemble("support", false)
        .unwrap();

    let paths: Vec<(&str, Role)> = template
        .files
        .iter()
        .map(|f| (f.path.as_str(), f.role))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("Support/Window.jsx", Role::Component),
            ("Support/SupportProvider.jsx", Role::Provider),
            ("Support/useSupport.js", Role::Hook),
        ]
    );
    assert_eq!(template.dependencies, vec!["react", "react-markdown"]);
    assert_eq!(template.env_vars, vec!["SUPPORT_API_KEY"]);

    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("package.json"),
        r#"{ "dependencies": { "react": "^18.0.0" } }"#,
    )
    .unwrap();
    let config = ProjectConfig::detect(temp.path());
    let installer = Installer::new(temp.path(), &config);

    let report = installer.install(&template, false).unwrap();
    assert_eq!(report.written.len(), 3);
    assert!(report.skipped.is_empty());

    let window = fs::read_to_string(temp.path().join("src/components/Support/Window.jsx")).unwrap();
    assert!(window.contains("export function Window(props)"));
    assert!(!window.contains("type Props"));
    assert!(temp
        .path()
        .join("src/providers/Support/SupportProvider.jsx")
        .exists());
    assert!(temp.path().join("src/hooks/Support/useSupport.js").exists());

    assert_eq!(
        installer.missing_dependencies(&template),
        vec!["react-markdown".to_string()]
    );

    let again = installer.install(&template, false).unwrap();
    assert!(again.written.is_empty());
    assert_eq!(again.skipped.len(), 3);
}

#[test]
fn keeps_typescript_sources_verbatim() {
    let server = MockServer::start();
    mock_repo(&server);

    let registry = Registry::from_yaml(REGISTRY).unwrap();
    let fetcher = fetcher(&server);
    let template = Assembler::new(&registry, &fetcher)
        .with_env_owner(Some("acme".to_string()))
        .assemble("support", true)
        .unwrap();

    let hook = template.files_for(Role::Hook).next().unwrap();
    assert_eq!(hook.path, "Support/useSupport.ts");
    assert_eq!(
        hook.content,
        "export const useSupport = (id: string): string => id;\n"
    );
}

#[test]
fn unknown_component_is_reported_before_fetching() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let registry = Registry::from_yaml(REGISTRY).unwrap();
    let fetcher = fetcher(&server);
    let err = Assembler::new(&registry, &fetcher)
        .assemble("sales", false)
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::UnknownComponent { ref id } if id == "sales"));
    any.assert_calls(0);
}
