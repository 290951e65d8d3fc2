//! Loggers. The chosen one is wired into `main.go`.

use modforge_core::domain::{Descriptor, Fragments, ServiceFile};

pub const ZAP: Descriptor = Descriptor::logger(
    "zap",
    "Zap",
    "Uber's structured, leveled logger",
    Fragments {
        config_yaml: None,
        config_go: None,
        init: Some(
            r#"if err = logger.New(level); err != nil {
	zap.S().Fatalw("main - logger - New", "error", err)
}"#,
        ),
        select: None,
        shutdown: None,
        imports: &["go.uber.org/zap", "{{MODULE}}/pkg/logger"],
        service: Some(ServiceFile {
            file_name: "zap.go",
            template: r#"package logger

import (
	"io"
	"log"

	"go.uber.org/zap"
	"go.uber.org/zap/zapcore"
)

// New installs a global zap logger at the given level.
func New(level string) error {
	log.SetOutput(io.Discard)

	var lvl zapcore.Level
	switch level {
	case "debug":
		lvl = zap.DebugLevel
	case "info":
		lvl = zap.InfoLevel
	case "warn":
		lvl = zap.WarnLevel
	case "error":
		lvl = zap.ErrorLevel
	case "panic":
		lvl = zap.PanicLevel
	case "fatal":
		lvl = zap.FatalLevel
	default:
		lvl = zap.InfoLevel
	}

	cfg := zap.NewProductionConfig()
	cfg.Level = zap.NewAtomicLevelAt(lvl)
	logger, err := cfg.Build()
	if err != nil {
		return err
	}

	zap.ReplaceGlobals(logger)
	return nil
}
"#,
        }),
    },
);

pub const ALL: [Descriptor; 1] = [ZAP];
