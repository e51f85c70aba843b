//! Integration tests rendering forwarding packages from Go sources.
#[macro_use]
mod utils;

use libaliaspkg::{AliasError, AliasPkg, DocsLevel, Filter, Package, Renderer};
use pretty_assertions::assert_eq;

gen_tests! {
	generate, {
		ignore_list_scenario {
			path: "example.com/widget",
			ignore: "Foo",
			input: r#"package widget

type Foo struct{}

func Bar(x int) string { return "" }

func baz() {}
"#,
			contains: [
				"func Bar(x int) string {\n\treturn widget.Bar(x)\n}",
			],
			excludes: ["Foo", "baz"],
		}
		parameter_named_like_package {
			path: "example.com/widget",
			input: r#"package widget

type Thing struct{}

func New(widget string) *Thing { return nil }
"#,
			contains: [
				"func New(widget_ string) *Thing {\n\treturn widget.New(widget_)\n}",
				"type Thing = widget.Thing",
			],
			excludes: ["New(widget string)"],
		}
		variadic_spread {
			path: "example.com/logs",
			input: r#"package logs

func Printf(format string, args ...any) {}

func Join(parts ...string) string { return "" }
"#,
			contains: [
				"func Printf(format string, args ...any) {\n\tlogs.Printf(format, args...)\n}",
				"func Join(parts ...string) string {\n\treturn logs.Join(parts...)\n}",
			],
			excludes: [],
		}
		methods_never_forwarded {
			path: "example.com/widget",
			include: "Paint,Widget",
			input: r#"package widget

type Widget struct{}

func (w *Widget) Paint() {}

func Paint() {}
"#,
			contains: [
				"type Widget = widget.Widget",
				"func Paint() {\n\twidget.Paint()\n}",
			],
			excludes: ["(w *Widget)"],
		}
		include_overrides_ignore {
			path: "example.com/widget",
			include: "Max",
			ignore: "Max,Min",
			input: r#"package widget

const Max, Min = 10, 0
"#,
			contains: ["const Max = widget.Max"],
			excludes: ["Min"],
		}
		docs_none {
			path: "example.com/widget",
			input: r#"// Package widget builds widgets.
package widget

// Size of a widget.
type Size int

// Default is the default size.
var Default Size = 1
"#,
			contains: ["type Size = widget.Size", "var Default = widget.Default"],
			excludes: ["// Package widget", "// Size of", "// Default is"],
		}
		docs_all {
			path: "example.com/widget",
			docs: DocsLevel::All,
			input: r#"// Package widget builds widgets.
package widget

// Size of a widget.
type Size int

// Default is the default size.
var Default Size = 1
"#,
			contains: [
				"// Package widget builds widgets.\npackage widget\n",
				"// Size of a widget.\ntype Size = widget.Size\n",
				"// Default is the default size.\nvar Default = widget.Default\n",
			],
			excludes: [],
		}
		docs_decls_only {
			path: "example.com/widget",
			docs: DocsLevel::Decls,
			input: r#"// Package widget builds widgets.
package widget

// Run runs.
func Run() error { return nil }
"#,
			contains: ["// Run runs.\nfunc Run() error {\n\treturn widget.Run()\n}"],
			excludes: ["// Package widget"],
		}
		generics {
			path: "example.com/stack",
			input: r#"package stack

type Stack[T any] []T

type Pair[K comparable, V any] struct{ Key K; Value V }

func Of[T any](items ...T) Stack[T] { return items }

func Keys[K comparable, V any](m map[K]V) []K { return nil }
"#,
			contains: [
				"type Stack[T any] = stack.Stack[T]",
				"type Pair[K comparable, V any] = stack.Pair[K, V]",
				"func Of[T any](items ...T) Stack[T] {\n\treturn stack.Of[T](items...)\n}",
				"func Keys[K comparable, V any](m map[K]V) []K {\n\treturn stack.Keys[K, V](m)\n}",
			],
			excludes: [],
		}
		generic_aliases {
			path: "example.com/sets",
			input: r#"package sets

type Set[T comparable] = map[T]struct{}

type (
	List[T any] = []T
	Size int
)

func Done() <-chan struct{} { return nil }
"#,
			contains: [
				"type Set[T comparable] = sets.Set[T]",
				"type List[T any] = sets.List[T]",
				"type Size = sets.Size",
				"func Done() <-chan struct{} {\n\treturn sets.Done()\n}",
			],
			excludes: [],
		}
		renamed_import_in_type_argument {
			path: "example.com/server",
			input: r#"package server

import stdhttp "net/http"

type List[T any] []T

func F(x List[stdhttp.Handler]) {}
"#,
			contains: [
				"\tstdhttp \"net/http\"\n",
				"func F(x List[stdhttp.Handler]) {\n\tserver.F(x)\n}",
			],
			excludes: ["\t\"net/http\"\n"],
		}
		qualified_types_and_imports {
			path: "example.com/server",
			input: r#"package server

import (
	"context"
	"net/http"

	"example.com/server/internal/routes"
)

func Serve(ctx context.Context, h http.Handler) error { return nil }

func Routes() routes.Table { return nil }
"#,
			contains: [
				"\t\"context\"\n",
				"\t\"example.com/server\"\n",
				"\t\"net/http\"\n",
				"func Serve(ctx context.Context, h http.Handler) error {\n\treturn server.Serve(ctx, h)\n}",
			],
			excludes: ["internal/routes\""],
		}
		blank_parameters {
			path: "example.com/hooks",
			input: r#"package hooks

func Ignore(_ string, _ int) bool { return false }

func Callback(func(int) error) {}
"#,
			contains: [
				"func Ignore(arg0 string, arg1 int) bool {\n\treturn hooks.Ignore(arg0, arg1)\n}",
				"func Callback(arg0 func(int) (error)) {\n\thooks.Callback(arg0)\n}",
			],
			excludes: [],
		}
		multiple_results {
			path: "example.com/files",
			input: r#"package files

import "io"

func Open(name string) (r io.ReadCloser, err error) { return nil, nil }
"#,
			contains: [
				"func Open(name string) (io.ReadCloser, error) {\n\treturn files.Open(name)\n}",
			],
			excludes: [],
		}
	}
}

#[test]
fn header_comes_first() {
	let output = utils::render(
		"example.com/widget",
		"package widget\n\nvar X = 1\n",
		DocsLevel::None,
		Filter::default(),
	);
	assert_eq!(
		output.lines().next(),
		Some("// Code generated by aliaspkg. DO NOT EDIT.")
	);
}

#[test]
fn build_version_adds_constraint() {
	let package =
		Package::from_sources("example.com/widget", &[("widget.go", "package widget\n\nvar X = 1\n")])
			.unwrap();
	let bytes = AliasPkg::new()
		.with_go_build_version(Some("go1.22".into()))
		.with_renderer(Renderer::unformatted())
		.render_package(&package)
		.unwrap();
	let output = String::from_utf8(bytes).unwrap();
	assert!(output.contains("//go:build go1.22\n"));
}

#[test]
fn struct_types_in_signatures_fail() {
	let package = Package::from_sources(
		"example.com/shape",
		&[(
			"shape.go",
			"package shape\n\nfunc Origin() struct{ X, Y int } { return struct{ X, Y int }{} }\n",
		)],
	)
	.unwrap();
	let err = AliasPkg::new()
		.with_renderer(Renderer::unformatted())
		.render_package(&package)
		.unwrap_err();
	assert!(matches!(err, AliasError::InDecl { ref decl, .. } if decl == "Origin"));
}

#[test]
fn syntax_errors_fail_loading() {
	let err = Package::from_sources("example.com/broken", &[("broken.go", "package broken\n\nfunc (")])
		.unwrap_err();
	assert!(matches!(err, AliasError::Parse { .. }));
}
