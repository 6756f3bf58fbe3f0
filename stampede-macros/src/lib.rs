use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{FnArg, GenericParam, Ident, ItemFn, LitInt, LitStr, Type, TypeReference};

/// Proc macro to denote a Task
///
/// Turns an `async fn` taking a single `&Session` argument into a function with the same name
/// which returns a `stampede::Task`. The task name defaults to the function name, and the weight
/// defaults to 1.
///
/// The function may return `()` or any `Result<T, E>` where `E` converts into a boxed error.
/// Errors are handed to the swarm, which records them; they are never retried.
///
/// NOTE: Lifetime parameters are not supported on task functions.
///
/// # Example
/// ```ignore
/// use stampede::prelude::*;
///
/// #[task(weight = 3)]
/// async fn index<S: Session>(session: &S) -> Result<(), TransportError> {
///     session.get("/").await?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn task(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = TaskArgs::default();
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("weight") {
            args.weight = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("name") {
            args.name = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported task argument, expected `weight` or `name`"))
        }
    });
    syn::parse_macro_input!(attr with parser);

    let input = syn::parse_macro_input!(item as ItemFn);
    task_internal(args, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Default)]
struct TaskArgs {
    weight: Option<LitInt>,
    name: Option<LitStr>,
}

fn task_internal(args: TaskArgs, input: ItemFn) -> syn::Result<TokenStream2> {
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    if sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            sig.fn_token,
            "tasks must be `async fn`",
        ));
    }

    if let Some(lifetime) = sig
        .generics
        .params
        .iter()
        .find(|p| matches!(p, GenericParam::Lifetime(_)))
    {
        return Err(syn::Error::new_spanned(
            lifetime,
            "lifetime parameters are not supported on tasks",
        ));
    }

    let session_ty = session_type(&sig)?;

    let task_name = sig.ident.clone();
    let inner_name = Ident::new(&format!("__stampede_{}", task_name), Span::call_site());
    let mut inner_sig = sig.clone();
    inner_sig.ident = inner_name.clone();

    let name = match args.name {
        Some(name) => quote! { #name },
        None => quote! { stringify!(#task_name) },
    };
    let weight = match args.weight {
        Some(weight) => quote! { #weight },
        None => quote! { ::stampede::task::DEFAULT_TASK_WEIGHT },
    };

    let (impl_generics, ty_generics, where_clause) = sig.generics.split_for_impl();
    let turbofish = ty_generics.as_turbofish();

    Ok(quote! {
        #(#attrs)* #vis fn #task_name #impl_generics () -> ::stampede::Task<#session_ty> #where_clause {
            fn __run #impl_generics (
                session: &#session_ty,
            ) -> ::stampede::task::TaskFuture<'_> #where_clause {
                ::std::boxed::Box::pin(async move {
                    ::stampede::task::TaskOutput::into_task_result(
                        #inner_name #turbofish (session).await,
                    )
                })
            }

            ::stampede::Task::new(#name, #weight, __run #turbofish)
        }

        #[doc(hidden)]
        #(#attrs)* #vis #inner_sig #block
    })
}

fn session_type(sig: &syn::Signature) -> syn::Result<&Type> {
    let mut inputs = sig.inputs.iter();
    let (Some(arg), None) = (inputs.next(), inputs.next()) else {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            "tasks take exactly one argument: `&Session`",
        ));
    };

    match arg {
        FnArg::Typed(pat) => match &*pat.ty {
            Type::Reference(TypeReference {
                mutability: None,
                lifetime: None,
                elem,
                ..
            }) => Ok(&**elem),
            other => Err(syn::Error::new_spanned(
                other,
                "task argument must be a shared reference to a session, e.g. `&S`",
            )),
        },
        FnArg::Receiver(recv) => Err(syn::Error::new_spanned(
            recv,
            "tasks cannot take `self`",
        )),
    }
}
