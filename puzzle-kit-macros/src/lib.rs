//! Procedural macros for the `puzzle-kit` crate.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Procedural macro attribute that generates a `PuzzleRunner` implementation.
///
/// The annotated struct or impl block's type becomes runnable, delegating to
/// `puzzle_kit::runner::run_puzzle` with the given puzzle type and display name.
///
/// # Properties
///
/// - `name` (required): An expression that evaluates to `&str`, representing the puzzle's display
///   name.
///   Can be a string literal or a constant.
///
/// - `puzzle` (required): The type implementing `Puzzle` that parses input and answers queries.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to anything other than a struct or impl block
/// - Required properties (`name`, `puzzle`) are missing
/// - Any property is specified more than once
/// - An unsupported property is provided
///
/// # Examples
///
/// ## On a struct
///
/// With a struct `Day01` implementing `Puzzle`:
///
/// ```ignore
/// #[puzzle_runner(name = "Day 1", puzzle = Day01)]
/// struct Day01Runner;
/// ```
///
/// ## On an impl block
///
/// With a struct `Calendar<const DAY: u8>` collecting runnable puzzles:
///
/// ```ignore
/// const NAME02: &str = "Day 2";
/// #[puzzle_runner(name = NAME02, puzzle = Day02)]
/// impl Calendar<2> {}
/// ```
#[proc_macro_attribute]
pub fn puzzle_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    // The expression to use as a puzzle name; should resolve to string slice
    let mut name_expr_opt: Option<Expr> = None;
    // The type to use for the `Puzzle` generic parameter
    let mut puzzle_ty_opt: Option<Type> = None;

    let puzzle_runner_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            if name_expr_opt.is_some() {
                return Err(meta.error("duplicate 'name' property"));
            }
            name_expr_opt = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("puzzle") {
            if puzzle_ty_opt.is_some() {
                return Err(meta.error("duplicate 'puzzle' property"));
            }
            puzzle_ty_opt = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported puzzle runner property"))
        }
    });
    parse_macro_input!(args with puzzle_runner_parser);

    let Some(name_expr) = name_expr_opt else {
        return missing_property("name");
    };
    let Some(puzzle_ty) = puzzle_ty_opt else {
        return missing_property("puzzle");
    };

    let original_input = input.clone(); // clone before macro consumes input
    let item = parse_macro_input!(input as Item);

    let runner_ty: Type = match item {
        Item::Struct(ItemStruct { ident, .. }) => syn::parse_quote!(#ident),
        Item::Impl(ItemImpl { self_ty, .. }) => *self_ty,
        _ => {
            return Error::new(
                proc_macro2::Span::call_site(),
                "the #[puzzle_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    let input_ts = proc_macro2::TokenStream::from(original_input);
    TokenStream::from(quote! {
        #input_ts

        impl puzzle_kit::runner::PuzzleRunner for #runner_ty {
            fn run(
                input: &str,
                handler: &mut dyn puzzle_kit::runner::OutputHandler,
                options: &puzzle_kit::runner::RunOptions<'_>,
            ) -> puzzle_kit::DynamicResult<()> {
                puzzle_kit::runner::run_puzzle::<#puzzle_ty>(#name_expr, input, handler, options)
            }
        }
    })
}

/// A compile error for a required property that wasn't given.
fn missing_property(property: &str) -> TokenStream {
    Error::new(
        proc_macro2::Span::call_site(),
        format!("missing required property: '{property}'"),
    )
    .to_compile_error()
    .into()
}
