//! Attribute macros for the Canto runtime.
//!
//! Both macros turn an `async fn` into a synchronous one that builds a
//! [`Scheduler`], spawns the body as its first task and runs the scheduler
//! until it is idle. The function may take a single scheduler parameter,
//! which is bound to a handle of the scheduler driving the body:
//!
//! ```rust,ignore
//! #[canto::main]
//! async fn main(scheduler: canto::Scheduler) {
//!     scheduler.sleep(std::time::Duration::from_millis(10)).await;
//! }
//! ```
//!
//! [`Scheduler`]: https://docs.rs/canto/latest/canto/struct.Scheduler.html

mod utils;

use proc_macro::{Delimiter, Group, TokenStream, TokenTree};

/// Runs an `async fn main` on a fresh Canto scheduler.
///
/// Accepts an optional `name = "..."` argument naming the scheduler in
/// logs.
#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut name: Option<String> = None;

    let attr_str = attr.to_string();
    for part in attr_str.split(',') {
        let part = part.trim();
        if let Some(v) = part.strip_prefix("name") {
            name = Some(v.trim_start_matches(|c: char| c == '=' || c.is_whitespace()).to_string());
        } else if !part.is_empty() {
            return utils::compile_error(&format!("unknown argument `{part}`"));
        }
    }

    let builder = match name {
        Some(name) => format!("::canto::Scheduler::builder().name({name}).build()"),
        None => "::canto::Scheduler::new()".to_string(),
    };

    expand(item, &builder, false)
}

/// Runs an `async fn` test on a fresh Canto scheduler.
///
/// The generated function is marked `#[test]`; a panic inside the body
/// unwinds out of the scheduler and fails the test.
#[proc_macro_attribute]
pub fn test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    expand(item, "::canto::Scheduler::new()", true)
}

fn expand(item: TokenStream, builder: &str, is_test: bool) -> TokenStream {
    let mut tokens: Vec<TokenTree> = item.into_iter().collect();

    let Some(async_pos) = tokens
        .iter()
        .position(|t| matches!(t, TokenTree::Ident(id) if id.to_string() == "async"))
    else {
        return utils::compile_error("the `async` keyword is missing from the function declaration");
    };
    tokens.remove(async_pos);

    let (Some(params_pos), Some(body_pos)) = (
        utils::params_position(&tokens),
        utils::body_position(&tokens),
    ) else {
        return utils::compile_error("expected a function with a body");
    };

    let params = match &tokens[params_pos] {
        TokenTree::Group(g) => g.stream(),
        _ => unreachable!(),
    };

    let binding = match utils::scheduler_param(params) {
        Ok(Some((pattern, ty))) => format!("let {pattern}: {ty} = __canto_scheduler.clone();"),
        Ok(None) => String::new(),
        Err(message) => return utils::compile_error(&message),
    };

    let body = match &tokens[body_pos] {
        TokenTree::Group(g) => g.stream().to_string(),
        _ => unreachable!(),
    };

    let new_body = format!(
        "{{
            let __canto_scheduler = {builder};
            {{
                {binding}
                __canto_scheduler.new_task(async move {{ {body} }});
            }}
            __canto_scheduler
                .run()
                .expect(\"canto scheduler failed while waiting for readiness\");
        }}"
    );

    let Ok(new_body) = new_body.parse::<TokenStream>() else {
        return utils::compile_error("failed to expand the function body");
    };

    tokens[body_pos] = TokenTree::Group(Group::new(Delimiter::Brace, new_body));
    tokens[params_pos] = TokenTree::Group(Group::new(Delimiter::Parenthesis, TokenStream::new()));

    let mut result: Vec<TokenTree> = Vec::new();
    if is_test {
        result.extend("#[test]".parse::<TokenStream>().unwrap_or_default());
    }
    result.extend(tokens);

    result.into_iter().collect()
}
