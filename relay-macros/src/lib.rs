use proc_macro::TokenStream;
use quote::quote;
use relay_core::Selector;
use syn::{
    LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
};

/// Compute a selector from a canonical signature at compile time.
///
/// ```rust,ignore
/// const TRANSFER: Selector = relay::selector!("transfer(address,uint256)");
/// ```
///
/// Non-canonical signatures (whitespace, parameter names, bad types) are
/// compile errors.
#[proc_macro]
pub fn selector(input: TokenStream) -> TokenStream {
    let signature = parse_macro_input!(input as LitStr);
    match expand_selector(&signature) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Compute an array of selectors, one per signature.
///
/// ```rust,ignore
/// const TOKEN: [Selector; 2] = relay::selectors!["initialize()", "owner()"];
/// ```
#[proc_macro]
pub fn selectors(input: TokenStream) -> TokenStream {
    let SignatureList(signatures) = parse_macro_input!(input as SignatureList);

    let mut items = Vec::with_capacity(signatures.len());
    for signature in &signatures {
        match expand_selector(signature) {
            Ok(tokens) => items.push(tokens),
            Err(err) => return err.to_compile_error().into(),
        }
    }

    TokenStream::from(quote! { [#(#items),*] })
}

fn expand_selector(signature: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    let selector = Selector::parse_signature(&signature.value())
        .map_err(|err| syn::Error::new(signature.span(), err.to_string()))?;
    let bytes = selector.as_bytes();

    Ok(quote! {
        ::relay::Selector::from_bytes([#(#bytes),*])
    })
}

struct SignatureList(Punctuated<LitStr, Token![,]>);

impl Parse for SignatureList {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let list = Punctuated::parse_terminated(input)?;
        if list.is_empty() {
            return Err(syn::Error::new(
                input.span(),
                "expected at least one signature string",
            ));
        }
        Ok(Self(list))
    }
}
