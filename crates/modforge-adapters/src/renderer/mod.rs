//! Go project renderer.
//!
//! Turns the enabled descriptors into the files of a scaffolded project:
//!
//! | File | Built from |
//! |------|------------|
//! | `cmd/app/main.go` | logger init fragment |
//! | `internal/app/app.go` | init, select and shutdown fragments |
//! | `config/config.go` | config struct fragments |
//! | `config/config.yaml`, `config/config.dev.yaml` | config YAML blocks |
//! | `pkg/<package>/<file>` | service files |
//!
//! Fragments are emitted in the order the modules arrive, which the registry
//! keeps sorted.

mod go_file;
mod yaml;

use modforge_core::{
    application::{ApplicationError, ports::ProjectRenderer},
    domain::{
        DescriptorKind, EnabledModule, FileRole, GoImport, Permissions, ProjectStructure,
        RenderContext, Settings,
    },
    error::{ForgeError, ForgeResult},
};
use thiserror::Error;
use tracing::{debug, instrument};

use go_file::GoFile;

pub const MAIN_FILE: &str = "cmd/app/main.go";
pub const APP_FILE: &str = "internal/app/app.go";
pub const CONFIG_GO_FILE: &str = "config/config.go";
pub const CONFIG_FILE: &str = "config/config.yaml";
pub const CONFIG_DEV_FILE: &str = "config/config.dev.yaml";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize config block '{key}': {source}")]
    Yaml {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl From<RenderError> for ForgeError {
    fn from(e: RenderError) -> Self {
        ApplicationError::RenderingFailed {
            reason: e.to_string(),
        }
        .into()
    }
}

/// Renders Go sources from descriptor fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoRenderer;

impl GoRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectRenderer for GoRenderer {
    #[instrument(skip_all, fields(module = %settings.module(), modules = modules.len()))]
    fn render(
        &self,
        settings: &Settings,
        modules: &[EnabledModule<'_>],
    ) -> ForgeResult<ProjectStructure> {
        let ctx = RenderContext::for_settings(settings);
        let (loggers, components): (Vec<&EnabledModule<'_>>, Vec<&EnabledModule<'_>>) = modules
            .iter()
            .partition(|m| m.kind() == DescriptorKind::Logger);

        let mut structure = ProjectStructure::new();

        // Logger files come first so the logger stage can be written on its own.
        for module in &loggers {
            add_service_file(&mut structure, module, &ctx, FileRole::Logger)?;
        }

        structure.add_file(
            MAIN_FILE,
            render_main(&loggers, &ctx),
            FileRole::Main,
            Permissions::default(),
        )?;
        structure.add_file(
            APP_FILE,
            render_app(&components, &ctx),
            FileRole::App,
            Permissions::default(),
        )?;
        structure.add_file(
            CONFIG_GO_FILE,
            render_config_go(&components, &ctx),
            FileRole::Config,
            Permissions::default(),
        )?;

        let blocks: Vec<_> = components
            .iter()
            .filter_map(|m| m.fragments().config_yaml)
            .collect();
        let yaml = yaml::join_documents(&blocks)?;
        for path in [CONFIG_FILE, CONFIG_DEV_FILE] {
            structure.add_file(path, yaml.clone(), FileRole::Config, Permissions::owner_only())?;
        }

        for module in &components {
            add_service_file(&mut structure, module, &ctx, FileRole::Service)?;
        }

        debug!(files = structure.file_count(), "Project rendered");
        Ok(structure)
    }
}

fn add_service_file(
    structure: &mut ProjectStructure,
    module: &EnabledModule<'_>,
    ctx: &RenderContext,
    role: FileRole,
) -> ForgeResult<()> {
    if let Some(service) = module.fragments().service {
        let path = format!("pkg/{}/{}", module.descriptor.package, service.file_name);
        structure.add_file(path, ctx.render(service.template), role, Permissions::default())?;
    }
    Ok(())
}

fn add_imports(file: &mut GoFile, module: &EnabledModule<'_>, ctx: &RenderContext) {
    for spec in module.fragments().imports {
        file.import(GoImport::parse(&ctx.render(spec)));
    }
}

fn render_main(loggers: &[&EnabledModule<'_>], ctx: &RenderContext) -> String {
    let module = ctx.get("MODULE").unwrap_or_default();
    let mut file = GoFile::new("main");
    file.import_path("context")
        .import_path("go.uber.org/zap")
        .import_path(&format!("{module}/config"))
        .import_path(&format!("{module}/internal/app"));

    file.line("var (")
        .line("\tVersion   = \"dev\"")
        .line("\tTimestamp = \"unknown\"")
        .line(")")
        .blank()
        .line("func main() {")
        .line("\tcfg, err := config.New(Version)")
        .line("\tif err != nil {")
        .line("\t\tzap.S().Fatalw(\"main - config - New\", \"error\", err)")
        .line("\t}")
        .blank()
        .line("\tlevel := \"info\"")
        .line("\tif Version == \"dev\" {")
        .line("\t\tlevel = \"debug\"")
        .line("\t}");

    for logger in loggers {
        add_imports(&mut file, logger, ctx);
        if let Some(init) = logger.fragments().init {
            file.blank().block(&ctx.render(init), 1);
        }
    }

    file.blank()
        .line("\tgCtx, cancel := context.WithCancel(context.Background())")
        .blank()
        .line("\tapp.Run(gCtx, cancel, cfg)")
        .line("}");

    file.finish()
}

fn render_app(components: &[&EnabledModule<'_>], ctx: &RenderContext) -> String {
    let module = ctx.get("MODULE").unwrap_or_default();
    let mut file = GoFile::new("app");
    for path in ["context", "os", "os/signal", "syscall", "go.uber.org/zap"] {
        file.import_path(path);
    }
    file.import_path(&format!("{module}/config"));
    for component in components {
        add_imports(&mut file, component, ctx);
    }

    file.line("// Run wires every component, blocks until a signal or a component")
        .line("// failure, then shuts everything down in the same order.")
        .line("func Run(gCtx context.Context, cancel context.CancelFunc, cfg *config.Config) {");

    if !components.is_empty() {
        file.line("\tvar err error");
    }

    let inits: Vec<_> = components.iter().filter_map(|c| c.fragments().init).collect();
    if !inits.is_empty() {
        file.blank().line("\t// Initialize components");
        for init in inits {
            file.block(&ctx.render(init), 1).blank();
        }
    }

    file.line("\t// Listen for interruptions")
        .line("\tinterrupt := make(chan os.Signal, 1)")
        .line("\tsignal.Notify(interrupt, os.Interrupt, syscall.SIGTERM)")
        .blank()
        .line("\tselect {")
        .line("\tcase stop := <-interrupt:")
        .line("\t\tzap.S().Infow(\"app - Run - received signal\", \"signal\", stop)");
    for select in components.iter().filter_map(|c| c.fragments().select) {
        file.block(&ctx.render(select), 1);
    }
    file.line("\t}")
        .blank()
        .line("\t// Shutdown")
        .line("\tcancel()");
    for shutdown in components.iter().filter_map(|c| c.fragments().shutdown) {
        file.block(&ctx.render(shutdown), 1);
    }

    if !components.is_empty() {
        // `err` must be read at least once for the file to compile.
        file.blank().line("\t_ = err");
    }
    file.line("}");

    file.finish()
}

fn render_config_go(components: &[&EnabledModule<'_>], ctx: &RenderContext) -> String {
    let mut file = GoFile::new("config");
    file.import_path("strings").import_path("github.com/spf13/viper");

    let groups: Vec<_> = components
        .iter()
        .filter_map(|c| c.fragments().config_go)
        .collect();
    if groups.is_empty() {
        file.line("type Config struct{}");
    } else {
        file.line("type Config struct {");
        for group in groups {
            file.block(&ctx.render(group), 1);
        }
        file.line("}");
    }

    file.blank()
        .line("// New reads config/config.yaml, or config/config.dev.yaml for dev builds.")
        .line("// APP_* environment variables override file values.")
        .line("func New(version string) (*Config, error) {")
        .line("\tv := viper.New()")
        .line("\tv.SetConfigType(\"yaml\")")
        .line("\tv.AddConfigPath(\"./config\")")
        .line("\tv.SetConfigName(\"config\")")
        .line("\tif version == \"dev\" {")
        .line("\t\tv.SetConfigName(\"config.dev\")")
        .line("\t}")
        .blank()
        .line("\tv.SetEnvPrefix(\"APP\")")
        .line("\tv.SetEnvKeyReplacer(strings.NewReplacer(\".\", \"_\"))")
        .line("\tv.AllowEmptyEnv(true)")
        .line("\tv.AutomaticEnv()")
        .blank()
        .line("\tif err := v.ReadInConfig(); err != nil {")
        .line("\t\treturn nil, err")
        .line("\t}")
        .blank()
        .line("\tc := &Config{}")
        .line("\tif err := v.Unmarshal(c); err != nil {")
        .line("\t\treturn nil, err")
        .line("\t}")
        .blank()
        .line("\treturn c, nil")
        .line("}");

    file.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    fn render(adapters: &[&str], services: &[(&str, Option<&str>)]) -> ProjectStructure {
        let registry = builtin::registry();
        let mut builder = Settings::builder()
            .module("example.com/foo")
            .go_version("1.22")
            .path("/tmp/foo")
            .adapters(adapters.iter().copied());
        for (name, flavor) in services {
            builder = builder.service(*name, flavor.map(str::to_string));
        }
        let settings = builder.build(&registry).unwrap();
        let modules = registry.enabled(&settings).unwrap();
        GoRenderer::new().render(&settings, &modules).unwrap()
    }

    fn content<'a>(structure: &'a ProjectStructure, path: &str) -> &'a str {
        &structure.get(path).unwrap().content
    }

    #[test]
    fn bare_project_has_core_files() {
        let structure = render(&[], &[]);
        structure.validate().unwrap();

        let app = content(&structure, APP_FILE);
        assert!(!app.contains("var err error"));
        assert!(app.contains("signal.Notify(interrupt, os.Interrupt, syscall.SIGTERM)"));
        assert!(content(&structure, CONFIG_GO_FILE).contains("type Config struct{}"));
        assert_eq!(content(&structure, CONFIG_FILE), "");
        assert!(structure.get("pkg/logger/zap.go").is_some());
    }

    #[test]
    fn main_initializes_logger_with_module_imports() {
        let structure = render(&[], &[]);
        let main = content(&structure, MAIN_FILE);
        assert!(main.starts_with("package main\n"));
        assert!(main.contains("\t\"example.com/foo/pkg/logger\""));
        assert!(main.contains("logger.New(level)"));
        assert!(main.contains("Version   = \"dev\""));
    }

    #[test]
    fn mariadb_adds_blank_driver_import() {
        let structure = render(&["mariadb"], &[]);
        let app = content(&structure, APP_FILE);
        assert!(app.contains("_ \"github.com/go-sql-driver/mysql\""));
        assert!(app.contains("var err error"));
    }

    #[test]
    fn config_files_are_owner_only() {
        let structure = render(&["redis"], &[]);
        for path in [CONFIG_FILE, CONFIG_DEV_FILE] {
            let file = structure.get(path).unwrap();
            assert_eq!(file.permissions, Permissions::owner_only());
            assert!(file.content.starts_with("redis:\n"));
        }
    }

    #[test]
    fn service_flavor_contributes_select_branch() {
        let structure = render(&[], &[("rest", Some("gin"))]);
        let app = content(&structure, APP_FILE);
        assert!(app.contains("case err = <-httpServer.Notify():"));
        assert!(app.contains("github.com/gin-gonic/gin"));
        assert!(structure.get("pkg/rest/server.go").is_some());
    }
}
