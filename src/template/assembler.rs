//! Template assembly.
//!
//! Resolves a component through the registry, fetches each declared path
//! group in role order (component, hook, provider), downgrades typed files
//! when JavaScript output is requested, and routes every file to its
//! destination role. Any failure aborts the whole assembly.

use super::classify::classify_path;
use super::usage::render_usage;
use super::{Template, TemplateFile};
use crate::error::{Result, ScaffoldError};
use crate::registry::{ComponentDescriptor, Registry, Role};
use crate::remote::{ContentFetcher, RepoCoordinate};
use crate::transform::{convert_file, SyntaxDowngrade, TextualDowngrade};

/// Owner used when nothing else names one.
pub const DEFAULT_OWNER: &str = "your-github-username";

/// Environment variable overriding the default owner.
pub const OWNER_ENV_VAR: &str = "GITHUB_OWNER";

/// Pick the repository owner.
///
/// A descriptor-pinned owner wins, then the explicit override, then the
/// environment value, then [`DEFAULT_OWNER`]. Blank values are ignored.
pub fn resolve_owner(
    pinned: Option<&str>,
    explicit: Option<&str>,
    env: Option<&str>,
) -> String {
    [pinned, explicit, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_OWNER)
        .to_string()
}

/// Builds [`Template`]s from registry entries.
pub struct Assembler<'a> {
    registry: &'a Registry,
    fetcher: &'a ContentFetcher,
    owner: Option<String>,
    env_owner: Option<String>,
    downgrade: Box<dyn SyntaxDowngrade>,
}

impl<'a> Assembler<'a> {
    /// Create an assembler reading the owner override from `GITHUB_OWNER`.
    pub fn new(registry: &'a Registry, fetcher: &'a ContentFetcher) -> Self {
        Self {
            registry,
            fetcher,
            owner: None,
            env_owner: std::env::var(OWNER_ENV_VAR).ok(),
            downgrade: Box::new(TextualDowngrade::lenient()),
        }
    }

    /// Explicit owner override (e.g. `--owner`).
    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    /// Replace the environment-supplied owner.
    pub fn with_env_owner(mut self, owner: Option<String>) -> Self {
        self.env_owner = owner;
        self
    }

    /// Use a different type-stripping implementation.
    pub fn with_downgrade(mut self, downgrade: Box<dyn SyntaxDowngrade>) -> Self {
        self.downgrade = downgrade;
        self
    }

    /// Coordinate the descriptor's files are fetched from.
    pub fn coordinate(&self, descriptor: &ComponentDescriptor) -> RepoCoordinate {
        let owner = resolve_owner(
            descriptor.owner.as_deref(),
            self.owner.as_deref(),
            self.env_owner.as_deref(),
        );
        RepoCoordinate::new(owner, &descriptor.repo, &descriptor.branch)
    }

    /// Assemble the component `id`.
    ///
    /// Fails with [`ScaffoldError::UnknownComponent`] before any network
    /// access if `id` is not registered.
    pub fn assemble(&self, id: &str, want_typescript: bool) -> Result<Template> {
        let descriptor = self
            .registry
            .lookup(id)
            .ok_or_else(|| ScaffoldError::UnknownComponent { id: id.to_string() })?;

        let coord = self.coordinate(descriptor);
        tracing::info!(
            "Assembling {} from {}/{}@{}",
            id,
            coord.owner,
            coord.repo,
            coord.branch
        );

        let mut files: Vec<TemplateFile> = Vec::new();

        for (group_role, path) in descriptor.paths.groups() {
            let fetched = self.fetcher.fetch_directory(&coord, path).map_err(|source| {
                ScaffoldError::TemplateFetch {
                    owner: coord.owner.clone(),
                    repo: coord.repo.clone(),
                    source: Box::new(source),
                }
            })?;
            tracing::debug!("{} group {} yielded {} files", group_role, path, fetched.len());

            for remote in fetched {
                let role = match group_role {
                    Role::Component => classify_path(&remote.path),
                    declared => declared,
                };
                let converted = convert_file(self.downgrade.as_ref(), &remote, want_typescript)?;

                push_unique(
                    &mut files,
                    TemplateFile {
                        path: prefixed(&descriptor.folder, &converted.path),
                        content: converted.content,
                        role,
                    },
                );
            }
        }

        Ok(Template {
            name: descriptor.name.clone(),
            files,
            dependencies: descriptor.dependencies.clone(),
            env_vars: descriptor.env_vars.clone(),
            usage: render_usage(&descriptor.name, want_typescript),
        })
    }
}

fn prefixed(folder: &str, path: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", folder, path)
    }
}

/// Later files replace earlier ones with the same destination.
fn push_unique(files: &mut Vec<TemplateFile>, file: TemplateFile) {
    match files
        .iter_mut()
        .find(|f| f.role == file.role && f.path == file.path)
    {
        Some(existing) => {
            tracing::warn!(
                "{} {} fetched twice; keeping the later copy",
                file.role,
                file.path
            );
            *existing = file;
        }
        None => files.push(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{Endpoints, HttpRetriever};
    use crate::transform::DowngradeMode;
    use httpmock::prelude::*;

    const TYPED_SOURCE: &str = "interface Foo { bar: string }\nexport const Chatbot = () => null;";

    fn fetcher(server: &MockServer) -> ContentFetcher {
        ContentFetcher::new(
            HttpRetriever::new().unwrap(),
            Endpoints::single(server.base_url()),
        )
    }

    fn mock_single_file(server: &MockServer, owner: &str, repo: &str, path: &str, body: &str) {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        let download = server.url(format!("/download/{}", path));
        let listing_path = format!("/repos/{}/{}/contents/{}", owner, repo, path);
        server.mock(|when, then| {
            when.method(GET).path(listing_path);
            then.status(200).json_body(serde_json::json!({
                "name": name,
                "path": path,
                "type": "file",
                "download_url": download,
            }));
        });
        let download_path = format!("/download/{}", path);
        let body = body.to_string();
        server.mock(|when, then| {
            when.method(GET).path(download_path);
            then.status(200).body(body);
        });
    }

    #[test]
    fn resolve_owner_precedence() {
        assert_eq!(resolve_owner(Some("pinned"), Some("cli"), Some("env")), "pinned");
        assert_eq!(resolve_owner(None, Some("cli"), Some("env")), "cli");
        assert_eq!(resolve_owner(None, None, Some("env")), "env");
        assert_eq!(resolve_owner(None, None, None), DEFAULT_OWNER);
    }

    #[test]
    fn resolve_owner_skips_blank_values() {
        assert_eq!(resolve_owner(None, Some(""), Some("env")), "env");
        assert_eq!(resolve_owner(None, Some("  "), None), DEFAULT_OWNER);
    }

    #[test]
    fn openai_typescript_keeps_source() {
        let server = MockServer::start();
        mock_single_file(
            &server,
            "acme",
            "react-chatbot-openai",
            "components/Chatbot.tsx",
            TYPED_SOURCE,
        );

        let registry = Registry::builtin().unwrap();
        let fetcher = fetcher(&server);
        let template = Assembler::new(&registry, &fetcher)
            .with_owner(Some("acme".to_string()))
            .assemble("openai", true)
            .unwrap();

        assert_eq!(
            template.files,
            vec![TemplateFile {
                path: "Chatbot/Chatbot.tsx".to_string(),
                content: TYPED_SOURCE.to_string(),
                role: Role::Component,
            }]
        );
        assert_eq!(
            template.dependencies,
            registry.lookup("openai").unwrap().dependencies
        );
        assert_eq!(
            template.env_vars,
            vec!["VITE_OPENAI_API_KEY", "REACT_APP_OPENAI_API_KEY"]
        );
        assert!(template.usage.starts_with("// App.tsx"));
    }

    #[test]
    fn openai_javascript_strips_types() {
        let server = MockServer::start();
        mock_single_file(
            &server,
            "acme",
            "react-chatbot-openai",
            "components/Chatbot.tsx",
            TYPED_SOURCE,
        );

        let registry = Registry::builtin().unwrap();
        let fetcher = fetcher(&server);
        let template = Assembler::new(&registry, &fetcher)
            .with_owner(Some("acme".to_string()))
            .assemble("openai", false)
            .unwrap();

        assert_eq!(template.files.len(), 1);
        let file = &template.files[0];
        assert_eq!(file.path, "Chatbot/Chatbot.jsx");
        assert!(!file.content.contains("interface"));
        assert_eq!(file.content, "export const Chatbot = () => null;");
        assert!(template.usage.starts_with("// App.jsx"));
    }

    #[test]
    fn unknown_component_makes_no_requests() {
        let server = MockServer::start();
        let any = server.mock(|when, then| {
            when.method(GET);
            then.status(200).body("[]");
        });

        let registry = Registry::builtin().unwrap();
        let fetcher = fetcher(&server);
        let err = Assembler::new(&registry, &fetcher)
            .assemble("missing-component", true)
            .unwrap_err();

        assert!(matches!(
            err,
            ScaffoldError::UnknownComponent { ref id } if id == "missing-component"
        ));
        any.assert_calls(0);
    }

    #[test]
    fn env_owner_used_without_explicit_override() {
        let server = MockServer::start();
        mock_single_file(
            &server,
            "from-env",
            "react-chatbot-openai",
            "components/Chatbot.tsx",
            TYPED_SOURCE,
        );

        let registry = Registry::builtin().unwrap();
        let fetcher = fetcher(&server);
        let assembler = Assembler::new(&registry, &fetcher)
            .with_env_owner(Some("from-env".to_string()));

        assert_eq!(
            assembler.coordinate(registry.lookup("openai").unwrap()).owner,
            "from-env"
        );
        assert!(assembler.assemble("openai", true).is_ok());
    }

    #[test]
    fn fetch_failure_aborts_with_owner_and_repo() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(404);
        });

        let registry = Registry::builtin().unwrap();
        let fetcher = fetcher(&server);
        let err = Assembler::new(&registry, &fetcher)
            .with_owner(Some("acme".to_string()))
            .assemble("openai", true)
            .unwrap_err();

        match err {
            ScaffoldError::TemplateFetch { owner, repo, source } => {
                assert_eq!(owner, "acme");
                assert_eq!(repo, "react-chatbot-openai");
                assert!(matches!(*source, ScaffoldError::Fetch { .. }));
            }
            other => panic!("expected TemplateFetch, got {:?}", other),
        }
    }

    #[test]
    fn declared_groups_take_explicit_roles() {
        let registry = Registry::from_yaml(
            r#"
components:
  - name: full
    owner: pinned
    repo: full-chat
    folder: Chat
    paths:
      component: src/Chat.tsx
      hook: src/hooks/chatState.ts
      provider: src/context/Store.tsx
    dependencies: [react]
"#,
        )
        .unwrap();

        let server = MockServer::start();
        mock_single_file(&server, "pinned", "full-chat", "src/Chat.tsx", "export const Chat = 1;");
        mock_single_file(
            &server,
            "pinned",
            "full-chat",
            "src/hooks/chatState.ts",
            "export const state = 1;",
        );
        mock_single_file(
            &server,
            "pinned",
            "full-chat",
            "src/context/Store.tsx",
            "export const Store = 1;",
        );

        let fetcher = fetcher(&server);
        let template = Assembler::new(&registry, &fetcher)
            .with_owner(Some("ignored".to_string()))
            .assemble("full", true)
            .unwrap();

        let summary: Vec<(Role, &str)> = template
            .files
            .iter()
            .map(|f| (f.role, f.path.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Role::Component, "Chat/Chat.tsx"),
                (Role::Hook, "Chat/chatState.ts"),
                (Role::Provider, "Chat/Store.tsx"),
            ]
        );
        assert_eq!(template.files_for(Role::Hook).count(), 1);
    }

    #[test]
    fn component_directory_files_are_classified() {
        let registry = Registry::from_yaml(
            r#"
components:
  - name: dir
    owner: acme
    repo: dir-chat
    paths:
      component: src
"#,
        )
        .unwrap();

        let server = MockServer::start();
        let listing = |name: &str| {
            serde_json::json!({
                "name": name,
                "path": format!("src/{}", name),
                "type": "file",
                "download_url": server.url(format!("/download/{}", name)),
            })
        };
        let entries = serde_json::json!([
            listing("Chatbot.tsx"),
            listing("useChat.ts"),
            listing("ChatProvider.tsx"),
        ]);
        server.mock(|when, then| {
            when.method(GET).path("/repos/acme/dir-chat/contents/src");
            then.status(200).json_body(entries);
        });
        for name in ["Chatbot.tsx", "useChat.ts", "ChatProvider.tsx"] {
            server.mock(|when, then| {
                when.method(GET).path(format!("/download/{}", name));
                then.status(200).body("export {};");
            });
        }

        let fetcher = fetcher(&server);
        let template = Assembler::new(&registry, &fetcher)
            .assemble("dir", false)
            .unwrap();

        let summary: Vec<(Role, &str)> = template
            .files
            .iter()
            .map(|f| (f.role, f.path.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Role::Component, "Chatbot/Chatbot.jsx"),
                (Role::Hook, "Chatbot/useChat.js"),
                (Role::Provider, "Chatbot/ChatProvider.jsx"),
            ]
        );
    }

    #[test]
    fn strict_downgrade_error_is_not_wrapped() {
        let server = MockServer::start();
        mock_single_file(
            &server,
            "acme",
            "react-chatbot-openai",
            "components/Chatbot.tsx",
            "const m: Map<string, Array<number>> = new Map();",
        );

        let registry = Registry::builtin().unwrap();
        let fetcher = fetcher(&server);
        let err = Assembler::new(&registry, &fetcher)
            .with_owner(Some("acme".to_string()))
            .with_downgrade(Box::new(TextualDowngrade::new(DowngradeMode::Strict)))
            .assemble("openai", false)
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::AmbiguousSyntax { .. }));
    }

    #[test]
    fn duplicate_destinations_keep_later_file() {
        let mut files = Vec::new();
        let file = |content: &str| TemplateFile {
            path: "Chatbot/index.ts".to_string(),
            content: content.to_string(),
            role: Role::Component,
        };
        push_unique(&mut files, file("first"));
        push_unique(&mut files, file("second"));

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].content, "second");
    }

    #[test]
    fn prefixed_handles_empty_folder() {
        assert_eq!(prefixed("", "a.tsx"), "a.tsx");
        assert_eq!(prefixed("Chatbot/", "a.tsx"), "Chatbot/a.tsx");
    }
}
