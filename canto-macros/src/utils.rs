use proc_macro::{Delimiter, TokenStream, TokenTree};

/// Converts a slice of tokens into a Rust source string.
///
/// Consecutive identifiers are separated by a space so that `mut x` does
/// not turn into `mutx`.
pub(crate) fn tokens_to_string(tokens: &[TokenTree]) -> String {
    let mut out = String::new();
    let mut prev_was_ident = false;

    for t in tokens {
        let is_ident = matches!(t, TokenTree::Ident(_));

        if prev_was_ident && is_ident {
            out.push(' ');
        }

        out.push_str(&t.to_string());
        prev_was_ident = is_ident;
    }

    out
}

/// Position of the function's parameter list: the first parenthesized
/// group after the `fn` keyword.
pub(crate) fn params_position(tokens: &[TokenTree]) -> Option<usize> {
    let fn_pos = tokens
        .iter()
        .position(|t| matches!(t, TokenTree::Ident(id) if id.to_string() == "fn"))?;

    tokens
        .iter()
        .skip(fn_pos)
        .position(|t| matches!(t, TokenTree::Group(g) if g.delimiter() == Delimiter::Parenthesis))
        .map(|offset| fn_pos + offset)
}

/// Position of the function body: the last brace-delimited group.
pub(crate) fn body_position(tokens: &[TokenTree]) -> Option<usize> {
    tokens
        .iter()
        .rposition(|t| matches!(t, TokenTree::Group(g) if g.delimiter() == Delimiter::Brace))
}

/// Parses the optional scheduler parameter.
///
/// Accepts an empty list or a single `pattern: Type` parameter and
/// returns the pattern and the type as source strings.
pub(crate) fn scheduler_param(params: TokenStream) -> Result<Option<(String, String)>, String> {
    let tokens: Vec<TokenTree> = params.into_iter().collect();

    if tokens.is_empty() {
        return Ok(None);
    }

    let Some(colon) = tokens
        .iter()
        .position(|t| matches!(t, TokenTree::Punct(p) if p.as_char() == ':'))
    else {
        return Err("expected a parameter of the form `name: Scheduler`".to_string());
    };

    let mut ty = &tokens[colon + 1..];
    if let Some(TokenTree::Punct(p)) = ty.last() {
        if p.as_char() == ',' {
            ty = &ty[..ty.len() - 1];
        }
    }

    if ty.is_empty() {
        return Err("missing type for the scheduler parameter".to_string());
    }

    if ty
        .iter()
        .any(|t| matches!(t, TokenTree::Punct(p) if p.as_char() == ','))
    {
        return Err("only a single scheduler parameter is supported".to_string());
    }

    Ok(Some((
        tokens_to_string(&tokens[..colon]),
        tokens_to_string(ty),
    )))
}

/// Emits a `compile_error!` carrying `message`.
pub(crate) fn compile_error(message: &str) -> TokenStream {
    format!("compile_error!({message:?});")
        .parse()
        .unwrap_or_default()
}
