//! Small descriptor set shared by the unit tests of this crate.

use super::{
    ConfigBlock, ConfigValue, Descriptor, Flavor, Fragments, Registry, RepoTemplate, ServiceFile,
};

pub const REDIS: Descriptor = Descriptor::adapter(
    "redis",
    "Redis",
    "key/value store",
    Fragments {
        config_yaml: Some(ConfigBlock::new(
            "redis",
            &[
                ("host", ConfigValue::Str("localhost")),
                ("port", ConfigValue::Int(6379)),
            ],
        )),
        config_go: Some("Redis struct {\n\tHost string `mapstructure:\"host\"`\n} `mapstructure:\"redis\"`"),
        init: Some("rdb, err := redis.New(gCtx)"),
        select: None,
        shutdown: Some("rdb.Close()"),
        imports: &["{{MODULE}}/pkg/redis"],
        service: Some(ServiceFile {
            file_name: "service.go",
            template: "package redis\n",
        }),
    },
);

pub const MARIADB: Descriptor = Descriptor::adapter(
    "mariadb",
    "MariaDB",
    "sql database",
    Fragments {
        config_yaml: Some(ConfigBlock::new("mariadb", &[("port", ConfigValue::Int(3306))])),
        config_go: Some("MariaDB struct{} `mapstructure:\"mariadb\"`"),
        init: Some("db, err := mariadb.New(gCtx)"),
        select: None,
        shutdown: Some("db.Close()"),
        imports: &["{{MODULE}}/pkg/mariadb"],
        service: Some(ServiceFile {
            file_name: "service.go",
            template: "package mariadb\n",
        }),
    },
);

pub const ZAP: Descriptor = Descriptor::logger(
    "zap",
    "Zap",
    "structured logging",
    Fragments {
        config_yaml: None,
        config_go: None,
        init: Some("logger.New(level)"),
        select: None,
        shutdown: None,
        imports: &["{{MODULE}}/pkg/logger"],
        service: Some(ServiceFile {
            file_name: "logger.go",
            template: "package logger\n",
        }),
    },
);

const GIN: Flavor = Flavor {
    name: "gin",
    display_name: "Gin",
    description: "http framework",
    fragments: Fragments {
        config_yaml: None,
        config_go: None,
        init: Some("srv := rest.New(gin.New())"),
        select: Some("case err = <-srv.Notify():"),
        shutdown: Some("err = srv.Shutdown()"),
        imports: &["github.com/gin-gonic/gin", "{{MODULE}}/pkg/rest"],
        service: Some(ServiceFile {
            file_name: "server.go",
            template: "package rest\n",
        }),
    },
};

const ECHO: Flavor = Flavor {
    name: "echo",
    display_name: "Echo",
    description: "http framework",
    fragments: Fragments::empty(),
};

pub const REST: Descriptor = Descriptor::service("rest", "REST", "http api", &[ECHO, GIN]);

pub fn registry() -> Registry {
    Registry::new()
        .with(REDIS)
        .with(MARIADB)
        .with(ZAP)
        .with(REST)
        .with_template(RepoTemplate::new("github.com/acme/tmpl", "test template"))
}
