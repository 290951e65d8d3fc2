//! Services and their flavors.
//!
//! Every REST flavor ships `pkg/rest/server.go` with the same surface
//! (`New`, `Notify`, `Shutdown`) so the app wiring only differs in how the
//! handler is built.

use modforge_core::domain::{Descriptor, Flavor, Fragments, ServiceFile};

const REST_SELECT: &str = r#"case err = <-httpServer.Notify():
	zap.S().Errorw("app - Run - httpServer.Notify", "error", err)"#;

const REST_SHUTDOWN: &str = r#"err = httpServer.Shutdown()
if err != nil {
	zap.S().Errorw("app - Run - httpServer.Shutdown", "error", err)
}"#;

/// `net/http` server wrapper shared by flavors whose router is an `http.Handler`.
const NET_HTTP_SERVER: &str = r#"package rest

import (
	"context"
	"net/http"
	"time"
)

const (
	defaultReadTimeout     = 5 * time.Second
	defaultWriteTimeout    = 5 * time.Second
	defaultAddr            = ":80"
	defaultShutdownTimeout = 5 * time.Second
)

type Service struct {
	server          *http.Server
	notify          chan error
	shutdownTimeout time.Duration
}

func New(handler http.Handler) *Service {
	httpServer := &http.Server{
		Handler:      handler,
		ReadTimeout:  defaultReadTimeout,
		WriteTimeout: defaultWriteTimeout,
		Addr:         defaultAddr,
	}

	s := &Service{
		server:          httpServer,
		notify:          make(chan error, 1),
		shutdownTimeout: defaultShutdownTimeout,
	}

	s.start()

	return s
}

func (s *Service) start() {
	go func() {
		s.notify <- s.server.ListenAndServe()
		close(s.notify)
	}()
}

func (s *Service) Notify() <-chan error {
	return s.notify
}

func (s *Service) Shutdown() error {
	ctx, cancel := context.WithTimeout(context.Background(), s.shutdownTimeout)
	defer cancel()

	return s.server.Shutdown(ctx)
}
"#;

const BEEGO: Flavor = Flavor {
    name: "beego",
    display_name: "beego/beego",
    description: "beego is an open-source, high-performance web framework for the Go programming language.",
    fragments: Fragments {
        config_yaml: None,
        config_go: None,
        init: Some(
            r#"handler := web.NewControllerRegister()
httpServer := rest.New(handler)"#,
        ),
        select: Some(REST_SELECT),
        shutdown: Some(REST_SHUTDOWN),
        imports: &["github.com/beego/beego/v2/server/web", "{{MODULE}}/pkg/rest"],
        service: Some(ServiceFile {
            file_name: "server.go",
            template: NET_HTTP_SERVER,
        }),
    },
};

const FASTHTTP: Flavor = Flavor {
    name: "fasthttp",
    display_name: "valyala/fasthttp",
    description: "Fast HTTP package for Go. Tuned for high performance. Zero memory allocations in hot paths. Up to 10x faster than net/http",
    fragments: Fragments {
        config_yaml: None,
        config_go: None,
        init: Some(
            r#"handler := router.New()
httpServer := rest.New(handler.Handler)"#,
        ),
        select: Some(REST_SELECT),
        shutdown: Some(REST_SHUTDOWN),
        imports: &["github.com/fasthttp/router", "{{MODULE}}/pkg/rest"],
        service: Some(ServiceFile {
            file_name: "server.go",
            template: r#"package rest

import (
	"time"

	"github.com/valyala/fasthttp"
)

const (
	defaultReadTimeout  = 5 * time.Second
	defaultWriteTimeout = 5 * time.Second
	defaultAddr         = ":80"
)

type Service struct {
	server *fasthttp.Server
	notify chan error
}

func New(handler fasthttp.RequestHandler) *Service {
	s := &Service{
		server: &fasthttp.Server{
			Handler:      handler,
			ReadTimeout:  defaultReadTimeout,
			WriteTimeout: defaultWriteTimeout,
		},
		notify: make(chan error, 1),
	}

	s.start()

	return s
}

func (s *Service) start() {
	go func() {
		s.notify <- s.server.ListenAndServe(defaultAddr)
		close(s.notify)
	}()
}

func (s *Service) Notify() <-chan error {
	return s.notify
}

func (s *Service) Shutdown() error {
	return s.server.Shutdown()
}
"#,
        }),
    },
};

const FIBER: Flavor = Flavor {
    name: "fiber",
    display_name: "gofiber/fiber",
    description: "Express inspired web framework written in Go",
    fragments: Fragments {
        config_yaml: None,
        config_go: None,
        init: Some(
            r#"handler := fiber.New()
httpServer := rest.New(handler)"#,
        ),
        select: Some(REST_SELECT),
        shutdown: Some(REST_SHUTDOWN),
        imports: &["github.com/gofiber/fiber/v2", "{{MODULE}}/pkg/rest"],
        service: Some(ServiceFile {
            file_name: "server.go",
            template: r#"package rest

import (
	"time"

	"github.com/gofiber/fiber/v2"
)

const (
	defaultAddr            = ":80"
	defaultShutdownTimeout = 5 * time.Second
)

type Service struct {
	app             *fiber.App
	notify          chan error
	shutdownTimeout time.Duration
}

func New(app *fiber.App) *Service {
	s := &Service{
		app:             app,
		notify:          make(chan error, 1),
		shutdownTimeout: defaultShutdownTimeout,
	}

	s.start()

	return s
}

func (s *Service) start() {
	go func() {
		s.notify <- s.app.Listen(defaultAddr)
		close(s.notify)
	}()
}

func (s *Service) Notify() <-chan error {
	return s.notify
}

func (s *Service) Shutdown() error {
	return s.app.ShutdownWithTimeout(s.shutdownTimeout)
}
"#,
        }),
    },
};

const GIN: Flavor = Flavor {
    name: "gin",
    display_name: "github.com/gin-gonic/gin",
    description: "Gin is a HTTP web framework written in Go (Golang). It features a Martini-like API with much better performance.",
    fragments: Fragments {
        config_yaml: None,
        config_go: None,
        init: Some(
            r#"handler := gin.New()
httpServer := rest.New(handler)"#,
        ),
        select: Some(REST_SELECT),
        shutdown: Some(REST_SHUTDOWN),
        imports: &["github.com/gin-gonic/gin", "{{MODULE}}/pkg/rest"],
        service: Some(ServiceFile {
            file_name: "server.go",
            template: NET_HTTP_SERVER,
        }),
    },
};

const GQLGEN: Flavor = Flavor {
    name: "gqlgen",
    display_name: "gqlgen",
    description: "Schema-first GraphQL server library",
    fragments: Fragments {
        config_yaml: None,
        config_go: None,
        init: Some("gqlServer := gql.New(nil)"),
        select: Some(
            r#"case err = <-gqlServer.Notify():
	zap.S().Errorw("app - Run - gqlServer.Notify", "error", err)"#,
        ),
        shutdown: Some(
            r#"err = gqlServer.Shutdown()
if err != nil {
	zap.S().Errorw("app - Run - gqlServer.Shutdown", "error", err)
}"#,
        ),
        imports: &["{{MODULE}}/pkg/gql"],
        service: Some(ServiceFile {
            file_name: "server.go",
            template: r#"package gql

import (
	"context"
	"net/http"
	"time"

	"github.com/99designs/gqlgen/graphql/playground"
)

const (
	defaultAddr            = ":8080"
	defaultShutdownTimeout = 5 * time.Second
)

type Service struct {
	server          *http.Server
	notify          chan error
	shutdownTimeout time.Duration
}

// New serves the playground on "/" and the given gqlgen handler on "/query".
// Pass the handler built from the generated executable schema.
func New(query http.Handler) *Service {
	mux := http.NewServeMux()
	mux.Handle("/", playground.Handler("GraphQL playground", "/query"))
	if query != nil {
		mux.Handle("/query", query)
	}

	s := &Service{
		server:          &http.Server{Addr: defaultAddr, Handler: mux},
		notify:          make(chan error, 1),
		shutdownTimeout: defaultShutdownTimeout,
	}

	s.start()

	return s
}

func (s *Service) start() {
	go func() {
		s.notify <- s.server.ListenAndServe()
		close(s.notify)
	}()
}

func (s *Service) Notify() <-chan error {
	return s.notify
}

func (s *Service) Shutdown() error {
	ctx, cancel := context.WithTimeout(context.Background(), s.shutdownTimeout)
	defer cancel()

	return s.server.Shutdown(ctx)
}
"#,
        }),
    },
};

pub const REST: Descriptor = Descriptor::service(
    "rest",
    "REST",
    "HTTP API server",
    &[BEEGO, FASTHTTP, FIBER, GIN],
);

pub const GQL: Descriptor = Descriptor::service("gql", "GraphQL", "GraphQL API server", &[GQLGEN]);

pub const ALL: [Descriptor; 2] = [GQL, REST];
