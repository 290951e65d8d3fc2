//! Data-store adapters.

use modforge_core::domain::{ConfigBlock, ConfigValue, Descriptor, Fragments, ServiceFile};

pub const MARIADB: Descriptor = Descriptor::adapter(
    "mariadb",
    "MariaDB",
    "MariaDB (MySQL protocol) via database/sql",
    Fragments {
        config_yaml: Some(ConfigBlock::new(
            "mariadb",
            &[
                ("host", ConfigValue::Str("localhost")),
                ("port", ConfigValue::Int(3306)),
                ("username", ConfigValue::Str("user")),
                ("password", ConfigValue::Str("password")),
                ("database", ConfigValue::Str("testdb")),
            ],
        )),
        config_go: Some(
            r#"MariaDB struct {
	Host     string `mapstructure:"host" json:"host"`
	Port     int    `mapstructure:"port" json:"port"`
	Username string `mapstructure:"username" json:"username"`
	Password string `mapstructure:"password" json:"password"`
	Database string `mapstructure:"database" json:"database"`
} `mapstructure:"mariadb" json:"mariadb"`"#,
        ),
        init: Some(
            r#"mdb, err := mariadb.New(cfg.MariaDB.Host, cfg.MariaDB.Port, cfg.MariaDB.Database, cfg.MariaDB.Username, cfg.MariaDB.Password)
if err != nil {
	zap.S().Fatalw("app - Run - mariadb.New", "error", err)
}
zap.S().Infow("main - app - Run", "message", "MariaDB initialized")"#,
        ),
        select: None,
        shutdown: Some("mdb.Close()"),
        imports: &["_ github.com/go-sql-driver/mysql", "{{MODULE}}/pkg/mariadb"],
        service: Some(ServiceFile {
            file_name: "service.go",
            template: r#"package mariadb

import (
	"database/sql"
	"fmt"
)

type MariaDB struct {
	DB *sql.DB
}

func New(host string, port int, database, username, password string) (*MariaDB, error) {
	connectionString := fmt.Sprintf("%s:%s@tcp(%s:%d)/%s?parseTime=true", username, password, host, port, database)
	client, err := sql.Open("mysql", connectionString)
	if err != nil {
		return nil, err
	}

	// Ping the database to check if the connection is alive
	if err := client.Ping(); err != nil {
		return nil, err
	}

	return &MariaDB{DB: client}, nil
}

func (m *MariaDB) Close() error {
	if m.DB != nil {
		return m.DB.Close()
	}

	return nil
}
"#,
        }),
    },
);

pub const MONGODB: Descriptor = Descriptor::adapter(
    "mongodb",
    "MongoDB",
    "MongoDB via the official Go driver",
    Fragments {
        config_yaml: Some(ConfigBlock::new(
            "mongodb",
            &[("uri", ConfigValue::Str("mongodb://localhost:27017"))],
        )),
        config_go: Some(
            r#"MongoDB struct {
	URI string `mapstructure:"uri" json:"uri"`
} `mapstructure:"mongodb" json:"mongodb"`"#,
        ),
        init: Some(
            r#"mongoClient, err := mongodb.New(gCtx, cfg.MongoDB.URI)
if err != nil {
	zap.S().Fatalw("app - Run - mongodb.New", "error", err)
}
zap.S().Infow("main - app - Run", "message", "MongoDB initialized")"#,
        ),
        select: None,
        shutdown: Some("mongoClient.Close(gCtx)"),
        imports: &["{{MODULE}}/pkg/mongodb"],
        service: Some(ServiceFile {
            file_name: "service.go",
            template: r#"package mongodb

import (
	"context"

	"go.mongodb.org/mongo-driver/mongo"
	"go.mongodb.org/mongo-driver/mongo/options"
	"go.mongodb.org/mongo-driver/mongo/readpref"
)

type MongoDB struct {
	Client *mongo.Client
}

func New(gCtx context.Context, uri string) (*MongoDB, error) {
	client, err := mongo.Connect(gCtx, options.Client().ApplyURI(uri))
	if err != nil {
		return nil, err
	}

	// Ping to see if connection was successful
	if err := client.Ping(gCtx, readpref.Primary()); err != nil {
		return nil, err
	}

	return &MongoDB{Client: client}, nil
}

func (m *MongoDB) Close(gCtx context.Context) {
	if m.Client != nil {
		_ = m.Client.Disconnect(gCtx)
	}
}
"#,
        }),
    },
);

pub const POSTGRES: Descriptor = Descriptor::adapter(
    "postgres",
    "Postgres",
    "PostgreSQL via pgx connection pool",
    Fragments {
        config_yaml: Some(ConfigBlock::new(
            "postgres",
            &[
                ("url", ConfigValue::Str("postgresql://user@localhost")),
                ("max_pool_size", ConfigValue::Int(10)),
            ],
        )),
        config_go: Some(
            r#"Postgres struct {
	URL         string `mapstructure:"url" json:"url"`
	MaxPoolSize int    `mapstructure:"max_pool_size" json:"max_pool_size"`
} `mapstructure:"postgres" json:"postgres"`"#,
        ),
        init: Some(
            r#"pg, err := postgres.New(gCtx, cfg.Postgres.URL, cfg.Postgres.MaxPoolSize)
if err != nil {
	zap.S().Fatalw("app - Run - postgres.New", "error", err)
}
zap.S().Infow("main - app - Run", "message", "Postgres initialized")"#,
        ),
        select: None,
        shutdown: Some("pg.Close()"),
        imports: &["{{MODULE}}/pkg/postgres"],
        service: Some(ServiceFile {
            file_name: "service.go",
            template: r#"package postgres

import (
	"context"
	"time"

	"github.com/jackc/pgx/v5/pgxpool"
)

const (
	defaultConnAttempts = 10
	defaultConnTimeout  = 5 * time.Second
)

type Postgres struct {
	maxPoolSize  int
	connAttempts int
	connTimeout  time.Duration

	Pool *pgxpool.Pool
}

func New(ctx context.Context, url string, maxPoolSize int) (*Postgres, error) {
	pg := &Postgres{
		maxPoolSize:  maxPoolSize,
		connAttempts: defaultConnAttempts,
		connTimeout:  defaultConnTimeout,
	}

	poolConfig, err := pgxpool.ParseConfig(url)
	if err != nil {
		return nil, err
	}

	poolConfig.MaxConns = int32(pg.maxPoolSize)

	for pg.connAttempts > 0 {
		pg.Pool, err = pgxpool.NewWithConfig(ctx, poolConfig)
		if err == nil {
			return pg, nil
		}

		time.Sleep(pg.connTimeout)
		pg.connAttempts--
	}

	return nil, err
}

func (pg *Postgres) Close() {
	if pg.Pool != nil {
		pg.Pool.Close()
	}
}
"#,
        }),
    },
);

pub const REDIS: Descriptor = Descriptor::adapter(
    "redis",
    "Redis",
    "Redis via go-redis",
    Fragments {
        config_yaml: Some(ConfigBlock::new(
            "redis",
            &[
                ("host", ConfigValue::Str("localhost")),
                ("port", ConfigValue::Int(6379)),
                ("password", ConfigValue::Str("password123")),
            ],
        )),
        config_go: Some(
            r#"Redis struct {
	Host     string `mapstructure:"host" json:"host"`
	Port     int    `mapstructure:"port" json:"port"`
	Password string `mapstructure:"password" json:"password"`
} `mapstructure:"redis" json:"redis"`"#,
        ),
        init: Some(
            r#"redisClient, err := redis.New(gCtx, cfg.Redis.Host, cfg.Redis.Port, cfg.Redis.Password)
if err != nil {
	zap.S().Fatalw("app - Run - redis.New", "error", err)
}
zap.S().Infow("main - app - Run", "message", "Redis initialized")"#,
        ),
        select: None,
        shutdown: Some("redisClient.Close()"),
        imports: &["{{MODULE}}/pkg/redis"],
        service: Some(ServiceFile {
            file_name: "service.go",
            template: r#"package redis

import (
	"context"
	"fmt"

	"github.com/go-redis/redis/v8"
)

type Redis struct {
	Client *redis.Client
}

func New(ctx context.Context, host string, port int, password string) (*Redis, error) {
	client := redis.NewClient(&redis.Options{
		Addr:     fmt.Sprintf("%s:%d", host, port),
		Password: password,
		DB:       0,
	})

	if _, err := client.Ping(ctx).Result(); err != nil {
		return nil, err
	}

	return &Redis{Client: client}, nil
}

func (r *Redis) Close() error {
	if r.Client != nil {
		return r.Client.Close()
	}

	return nil
}
"#,
        }),
    },
);

pub const ALL: [Descriptor; 4] = [MARIADB, MONGODB, POSTGRES, REDIS];
