//! Procedural macros for deferred-outcome
//!
//! This crate provides the `#[deferred_outcome::test]` attribute macro, which
//! turns an async test into a Tokio test and builds the emitter (and
//! optionally a manual clock) it asks for.
//!
//! # Example
//!
//! ```rust,ignore
//! use deferred_outcome::prelude::*;
//!
//! #[deferred_outcome::test(invert_outcome = true)]
//! async fn inverted_success_fails(emitter: Emitter) {
//!     let outcome = emitter.succeed("Hello").await;
//!     assert!(outcome.is_failure());
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, FnArg, GenericArgument, Ident, ItemFn, Lit, Pat, PatType, PathArguments,
    Token, Type,
};

/// Configuration options for the test macro.
struct TestConfig {
    invert_outcome: bool,
    substitute_value: bool,
    /// Start Tokio's clock paused so real delays are skipped (default: true)
    start_paused: bool,
    /// Flavor for tokio runtime ("current_thread" or "multi_thread")
    flavor: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            invert_outcome: false,
            substitute_value: false,
            start_paused: true,
            flavor: None,
        }
    }
}

fn parse_bool(ident: &Ident, lit: Lit) -> syn::Result<bool> {
    match lit {
        Lit::Bool(b) => Ok(b.value()),
        other => Err(syn::Error::new_spanned(
            other,
            format!("`{ident}` expects `true` or `false`"),
        )),
    }
}

impl Parse for TestConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = TestConfig::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let lit: Lit = input.parse()?;

            match ident.to_string().as_str() {
                "invert_outcome" => config.invert_outcome = parse_bool(&ident, lit)?,
                "substitute_value" => config.substitute_value = parse_bool(&ident, lit)?,
                "start_paused" => config.start_paused = parse_bool(&ident, lit)?,
                "flavor" => match lit {
                    Lit::Str(s) => config.flavor = Some(s.value()),
                    other => {
                        return Err(syn::Error::new_spanned(other, "`flavor` expects a string"));
                    }
                },
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {ident}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(config)
    }
}

/// What a test parameter asks to have injected.
enum Injected<'a> {
    Clock(&'a Pat),
    Emitter {
        pat: &'a Pat,
        ty: &'a Type,
        /// Declared as `Emitter<ManualClock>`.
        manual: bool,
    },
}

fn type_name(ty: &Type) -> Option<String> {
    if let Type::Path(type_path) = ty {
        type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
    } else {
        None
    }
}

/// Name of the first generic argument, e.g. `ManualClock` in `Emitter<ManualClock>`.
fn timer_name(ty: &Type) -> Option<String> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let PathArguments::AngleBracketed(args) = &type_path.path.segments.last()?.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(timer) => type_name(timer),
        _ => None,
    })
}

fn classify(arg: &FnArg) -> syn::Result<Injected<'_>> {
    let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
        return Err(syn::Error::new_spanned(arg, "test functions cannot take `self`"));
    };

    match type_name(ty).as_deref() {
        Some("ManualClock") => Ok(Injected::Clock(&**pat)),
        Some("Emitter") => Ok(Injected::Emitter {
            pat: &**pat,
            ty: &**ty,
            manual: timer_name(ty).as_deref() == Some("ManualClock"),
        }),
        _ => Err(syn::Error::new_spanned(
            ty,
            "unsupported test parameter: expected `Emitter` or `ManualClock`",
        )),
    }
}

/// Test attribute macro for emitter-driven async tests.
///
/// Runs the test on Tokio and injects parameters by type:
///
/// - `clock: ManualClock` - a fresh virtual clock starting at zero
/// - `emitter: Emitter<..>` - an emitter built from the attribute options,
///   driven by the injected `ManualClock` when there is one and by real
///   Tokio time otherwise. Declare it as `Emitter<ManualClock>` exactly when
///   the test also takes a `ManualClock`.
///
/// # Configuration Options
///
/// - `invert_outcome = true` - swap success and failure
/// - `substitute_value = true` - settle with `"Wrong Value"`
/// - `start_paused = false` - run on a live Tokio clock (default: paused)
/// - `flavor = "multi_thread"` - Tokio runtime flavor (requires `start_paused = false`)
///
/// ```rust,ignore
/// use deferred_outcome::prelude::*;
///
/// #[deferred_outcome::test(substitute_value = true)]
/// async fn substituted(emitter: Emitter<ManualClock>, clock: ManualClock) {
///     let deferred = emitter.succeed_after("Hello", Duration::from_millis(50));
///     clock.advance(Duration::from_millis(50));
///     assert_eq!(deferred.await, Outcome::Success("Wrong Value".into()));
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let config = parse_macro_input!(attr as TestConfig);
    let input = parse_macro_input!(item as ItemFn);

    expand_test(&config, &input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_test(config: &TestConfig, input: &ItemFn) -> syn::Result<TokenStream2> {
    let name = &input.sig.ident;
    let body = &input.block;
    let attrs = &input.attrs;
    let vis = &input.vis;

    if input.sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            &input.sig,
            "test function must be async",
        ));
    }

    let mut clock = None;
    let mut emitter = None;
    for arg in &input.sig.inputs {
        match classify(arg)? {
            Injected::Clock(pat) if clock.is_none() => clock = Some(pat),
            Injected::Emitter { pat, ty, manual } if emitter.is_none() => {
                emitter = Some((pat, ty, manual));
            }
            _ => {
                return Err(syn::Error::new_spanned(arg, "parameter injected twice"));
            }
        }
    }

    match (emitter, clock) {
        (Some((_, ty, true)), None) => {
            return Err(syn::Error::new_spanned(
                ty,
                "`Emitter<ManualClock>` needs a `ManualClock` parameter",
            ));
        }
        (Some((_, ty, false)), Some(_)) => {
            return Err(syn::Error::new_spanned(
                ty,
                "with a `ManualClock` parameter the emitter must be `Emitter<ManualClock>`",
            ));
        }
        _ => {}
    }

    // The clock is built first so the emitter can share it.
    let clock_init = clock.map(|pat| {
        quote! {
            let #pat = ::deferred_outcome::clock::ManualClock::new();
        }
    });

    let invert_outcome = config.invert_outcome;
    let substitute_value = config.substitute_value;
    let emitter_init = emitter.map(|(pat, ty, _)| {
        let emitter_config = quote! {
            ::deferred_outcome::EmitterConfig::new()
                .with_invert_outcome(#invert_outcome)
                .with_substitute_value(#substitute_value)
        };
        match clock {
            Some(clock_pat) => quote! {
                let #pat: #ty = ::deferred_outcome::Emitter::with_timer(
                    #emitter_config,
                    ::std::clone::Clone::clone(&#clock_pat),
                );
            },
            None => quote! {
                let #pat: #ty = ::deferred_outcome::Emitter::new(#emitter_config);
            },
        }
    });

    let flavor = config.flavor.as_deref().unwrap_or("current_thread");
    let tokio_attr = match (flavor, config.start_paused) {
        ("current_thread", true) => quote! { #[::tokio::test(start_paused = true)] },
        ("current_thread", false) => quote! { #[::tokio::test] },
        ("multi_thread", false) => quote! { #[::tokio::test(flavor = "multi_thread")] },
        ("multi_thread", true) => {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "`start_paused` needs the current_thread flavor; add `start_paused = false`",
            ));
        }
        (other, _) => {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                format!("unsupported flavor: {other}. Use \"current_thread\" or \"multi_thread\""),
            ));
        }
    };

    Ok(quote! {
        #tokio_attr
        #(#attrs)*
        #vis async fn #name() {
            #clock_init
            #emitter_init
            #body
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{expand_test, TestConfig};
    use syn::ItemFn;

    #[::core::prelude::v1::test]
    fn test_config_parse_empty() {
        let config: TestConfig = syn::parse_str("").unwrap();
        assert!(!config.invert_outcome);
        assert!(!config.substitute_value);
        assert!(config.start_paused);
        assert!(config.flavor.is_none());
    }

    #[::core::prelude::v1::test]
    fn test_config_parse_flags() {
        let config: TestConfig =
            syn::parse_str("invert_outcome = true, substitute_value = true").unwrap();
        assert!(config.invert_outcome);
        assert!(config.substitute_value);
    }

    #[::core::prelude::v1::test]
    fn test_config_parse_runtime_options() {
        let config: TestConfig =
            syn::parse_str("start_paused = false, flavor = \"multi_thread\"").unwrap();
        assert!(!config.start_paused);
        assert_eq!(config.flavor.as_deref(), Some("multi_thread"));
    }

    #[::core::prelude::v1::test]
    fn test_config_rejects_unknown_option() {
        let err = syn::parse_str::<TestConfig>("reverse_logic = true")
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown attribute: reverse_logic"));
    }

    #[::core::prelude::v1::test]
    fn test_config_rejects_non_bool_flag() {
        assert!(syn::parse_str::<TestConfig>("invert_outcome = \"yes\"").is_err());
    }

    #[::core::prelude::v1::test]
    fn test_expand_rejects_sync_fn() {
        let input: ItemFn = syn::parse_str("fn not_async() {}").unwrap();
        let err = expand_test(&TestConfig::default(), &input).unwrap_err();
        assert!(err.to_string().contains("must be async"));
    }

    #[::core::prelude::v1::test]
    fn test_expand_rejects_unknown_parameter() {
        let input: ItemFn = syn::parse_str("async fn t(count: usize) {}").unwrap();
        let err = expand_test(&TestConfig::default(), &input).unwrap_err();
        assert!(err.to_string().contains("unsupported test parameter"));
    }

    #[::core::prelude::v1::test]
    fn test_expand_rejects_paused_multi_thread() {
        let config: TestConfig = syn::parse_str("flavor = \"multi_thread\"").unwrap();
        let input: ItemFn = syn::parse_str("async fn t() {}").unwrap();
        assert!(expand_test(&config, &input).is_err());
    }

    #[::core::prelude::v1::test]
    fn test_expand_rejects_manual_emitter_without_clock() {
        let input: ItemFn =
            syn::parse_str("async fn t(emitter: Emitter<ManualClock>) {}").unwrap();
        let err = expand_test(&TestConfig::default(), &input).unwrap_err();
        assert!(err.to_string().contains("needs a `ManualClock` parameter"));
    }

    #[::core::prelude::v1::test]
    fn test_expand_rejects_tokio_emitter_with_clock() {
        let input: ItemFn =
            syn::parse_str("async fn t(emitter: Emitter, clock: ManualClock) {}").unwrap();
        let err = expand_test(&TestConfig::default(), &input).unwrap_err();
        assert!(err.to_string().contains("must be `Emitter<ManualClock>`"));
    }

    #[::core::prelude::v1::test]
    fn test_expand_tokio_emitter_uses_new() {
        let input: ItemFn = syn::parse_str("async fn t(emitter: Emitter) {}").unwrap();
        let tokens = expand_test(&TestConfig::default(), &input)
            .unwrap()
            .to_string();
        assert!(tokens.contains("Emitter :: new"));
        assert!(!tokens.contains("with_timer"));
    }

    #[::core::prelude::v1::test]
    fn test_expand_shares_clock_with_emitter() {
        let input: ItemFn = syn::parse_str(
            "async fn t(emitter: Emitter<ManualClock>, clock: ManualClock) {}",
        )
        .unwrap();
        let tokens = expand_test(&TestConfig::default(), &input)
            .unwrap()
            .to_string();
        assert!(tokens.contains("with_timer"));
        assert!(tokens.contains("start_paused = true"));
    }
}
