//! Procedural macros for the `advent-runner` crate.

use proc_macro::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Properties collected from `#[solution_runner(...)]`.
#[derive(Default)]
struct RunnerProperties {
    /// Expression for the solution name; should resolve to a string slice.
    name: Option<Expr>,
    /// Type implementing `ParseData`.
    parsed: Option<Type>,
    /// Type implementing `Solution<PartOne>`.
    part_one: Option<Type>,
    /// Type implementing `Solution<PartTwo>`.
    part_two: Option<Type>,
}

impl RunnerProperties {
    fn parse_property(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        fn set_once<T: syn::parse::Parse>(
            slot: &mut Option<T>,
            key: &str,
            meta: &ParseNestedMeta,
        ) -> syn::Result<()> {
            if slot.is_some() {
                return Err(meta.error(format!("duplicate '{key}' property")));
            }
            *slot = Some(meta.value()?.parse()?);
            Ok(())
        }

        if meta.path.is_ident("name") {
            set_once(&mut self.name, "name", meta)
        } else if meta.path.is_ident("parsed") {
            set_once(&mut self.parsed, "parsed", meta)
        } else if meta.path.is_ident("part_one") {
            set_once(&mut self.part_one, "part_one", meta)
        } else if meta.path.is_ident("part_two") {
            set_once(&mut self.part_two, "part_two", meta)
        } else {
            Err(meta.error("unsupported solution runner property"))
        }
    }
}

fn missing_property(key: &str) -> TokenStream {
    Error::new(
        proc_macro2::Span::call_site(),
        format!("missing required property: '{key}'"),
    )
    .to_compile_error()
    .into()
}

/// Generates an `advent_runner::runner::SolutionRunner` implementation.
///
/// # Properties
///
/// - `name` (required): an expression evaluating to `&str`, the solution's display name.
/// - `part_one` (required): the type implementing `Solution<PartOne>`.
/// - `part_two` (required): the type implementing `Solution<PartTwo>`.
/// - `parsed` (optional): a type implementing `ParseData`. Both parts then receive the parsed
///   value instead of the raw input string.
///
/// Applies to a struct or an impl block; the implementation is generated for that type.
///
/// # Errors
///
/// Emits a compile error if a property is missing, repeated, or unknown, or if applied to any
/// other item.
///
/// # Examples
///
/// ```ignore
/// #[solution_runner(name = "Day 1", part_one = Day01, part_two = Day01)]
/// struct Day01Runner;
///
/// #[solution_runner(name = "Day 5", parsed = Almanac, part_one = Day05, part_two = Day05)]
/// impl Calendar<5> {}
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut properties = RunnerProperties::default();
    let properties_parser = syn::meta::parser(|meta| properties.parse_property(&meta));
    parse_macro_input!(args with properties_parser);

    let Some(name_expr) = properties.name else {
        return missing_property("name");
    };
    let Some(part_one_ty) = properties.part_one else {
        return missing_property("part_one");
    };
    let Some(part_two_ty) = properties.part_two else {
        return missing_property("part_two");
    };

    let solve_function_call = if let Some(parsed_ty) = properties.parsed {
        quote! {
            advent_runner::runner::solve_parsed_solution::<#parsed_ty, #part_one_ty, #part_two_ty>(
                #name_expr,
                input,
                handler
            )
        }
    } else {
        quote! {
            advent_runner::runner::solve_solution::<#part_one_ty, #part_two_ty>(
                #name_expr,
                input,
                handler
            )
        }
    };

    let original_input = input.clone(); // clone before macro consumes input
    let item = parse_macro_input!(input as Item);

    let runner_ty = match item {
        Item::Struct(ItemStruct { ident, .. }) => quote! { #ident },
        Item::Impl(ItemImpl { self_ty, .. }) => quote! { #self_ty },
        _ => {
            return Error::new(
                proc_macro2::Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    let input_ts = proc_macro2::TokenStream::from(original_input);
    TokenStream::from(quote! {
        #input_ts

        impl advent_runner::runner::SolutionRunner for #runner_ty {
            fn run(
                input: &str,
                handler: &mut dyn advent_runner::runner::OutputHandler,
            ) -> advent_runner::DynamicResult<advent_runner::runner::Timings> {
                #solve_function_call
            }
        }
    })
}
