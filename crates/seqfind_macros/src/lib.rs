#![warn(clippy::pedantic)]

use ariadne::{
    Config,
    Label,
    Report,
    ReportKind,
    Source,
};
use proc_macro::TokenStream;
use proc_macro2::{
    Literal,
    Span,
    TokenStream as TokenStream2,
};
use quote::{
    ToTokens,
    TokenStreamExt as _,
};
use seqfind_common::{
    Reason,
    Simple,
};
use std::ops::Range;
use syn::{
    parenthesized,
    parse::{
        Parse,
        ParseStream,
        Result as ParseResult,
    },
    parse_macro_input,
    Ident,
    LitStr,
    Token,
    Visibility,
};

macro_rules! unsuffixed_primitive {
    ($type:ident: $primitive:ident => $method:ident) => {
        struct $type($primitive);

        impl ToTokens for $type {
            fn to_tokens(&self, tokens: &mut TokenStream2) {
                tokens.append(Literal::$method(self.0))
            }
        }

        impl From<$primitive> for $type {
            fn from(value: $primitive) -> Self {
                Self(value)
            }
        }
    };
}

unsuffixed_primitive!(UnsuffixedUsize: usize => usize_unsuffixed);
unsuffixed_primitive!(UnsuffixedU8: u8 => u8_unsuffixed);

enum Method {
    Hex,
    Text,
}

impl TryFrom<Ident> for Method {
    type Error = syn::Error;

    fn try_from(value: Ident) -> Result<Self, Self::Error> {
        match value.to_string().as_str() {
            "hex" => Ok(Self::Hex),
            "text" => Ok(Self::Text),
            _ => Err(syn::Error::new(
                value.span(),
                "expected one of: `hex`, `text`",
            )),
        }
    }
}

/// A pattern that failed validation, in terms of the pattern's own text.
struct Invalid {
    span: Range<usize>,
    message: String,
    label: String,
}

impl From<&Simple<char>> for Invalid {
    fn from(error: &Simple<char>) -> Self {
        Self {
            span: error.span(),
            message: error.to_string(),
            label: Reason::from(error.reason()).to_string(),
        }
    }
}

struct Item {
    visibility: Visibility,
    name: Ident,
    method: Method,
    pattern: String,
}

impl Item {
    #[must_use]
    fn into_tokens(self) -> TokenStream2 {
        let bytes = match self.method {
            Method::Hex => seqfind_common::parse_hex(&self.pattern)
                .map_err(|errors| Invalid::from(&errors[0])),
            Method::Text if self.pattern.is_empty() => Err(Invalid {
                span: 0..0,
                message: "a needle must contain at least one byte".to_owned(),
                label: "empty pattern".to_owned(),
            }),
            Method::Text => Ok(self.pattern.clone().into_bytes()),
        };

        match bytes {
            Ok(bytes) => self.tokenize_needle(&bytes),
            Err(invalid) => self.tokenize_error(&invalid),
        }
    }

    #[must_use]
    fn tokenize_needle(&self, bytes: &[u8]) -> TokenStream2 {
        let needle_len: UnsuffixedUsize = bytes.len().into();
        let bytes: TokenStream2 = bytes
            .iter()
            .map(|&x| {
                let x = UnsuffixedU8(x);
                quote::quote!(#x,)
            })
            .collect();
        let Self {
            visibility, name, ..
        } = self;
        quote::quote! {
            #visibility const #name: ::seqfind::StaticNeedle<#needle_len> = ::seqfind::StaticNeedle::new([#bytes]);
        }
    }

    #[must_use]
    fn tokenize_error(&self, invalid: &Invalid) -> TokenStream2 {
        let mut buffer = Vec::new();
        let written = Report::build(ReportKind::Error, (), invalid.span.start)
            .with_config(Config::default().with_color(false))
            .with_message(&invalid.message)
            .with_label(Label::new(invalid.span.clone()).with_message(&invalid.label))
            .finish()
            .write(Source::from(&self.pattern), &mut buffer);
        let error_message = match written.map(|()| String::from_utf8(buffer)) {
            Ok(Ok(report)) => report,
            _ => invalid.message.clone(),
        };
        quote::quote_spanned!(Span::call_site() => compile_error!(#error_message);)
    }
}

impl Parse for Item {
    fn parse(input: ParseStream) -> ParseResult<Self> {
        let visibility = input.parse()?;
        input.parse::<Token![const]>()?;
        let name = input.parse()?;
        input.parse::<Token![=]>()?;
        let method = input.parse::<Ident>()?.try_into()?;
        let pattern = {
            let content;
            parenthesized!(content in input);
            content.parse::<LitStr>()?.value()
        };
        input.parse::<Token![;]>()?;
        Ok(Self {
            visibility,
            name,
            method,
            pattern,
        })
    }
}

struct Items(Vec<Item>);

impl Parse for Items {
    fn parse(input: ParseStream) -> ParseResult<Self> {
        let mut items = Vec::new();
        while !input.is_empty() {
            items.push(input.parse()?);
        }
        Ok(Self(items))
    }
}

/// Parses, validates, and constructs byte [`Needle`](seqfind_common::Needle)s at compile-time.
///
/// ## Syntax
/// Expects one or more items of the form: `$VISIBILITY? const $IDENTIFIER = $METHOD("$PATTERN");`
///
/// With the following rules:
/// * `$VISIBILITY` is a valid [Visibility](<https://doc.rust-lang.org/reference/visibility-and-privacy.html>) token, or nothing.
/// * `$IDENTIFIER` is a valid [Identifier](<https://doc.rust-lang.org/reference/identifiers.html>) token.
/// * `$METHOD` is one of:
///   * `hex`, whitespace separated pairs of hexdigits.
///   * `text`, the raw bytes of a non-empty string.
/// * `$PATTERN` is a valid pattern whose syntax depends on the chosen `$METHOD`.
///
/// The generated consts name their type through the `seqfind` crate.
///
/// ## Example
/// ```
/// # extern crate seqfind_common as seqfind;
/// # use seqfind_macros::seqfind;
/// # use seqfind_common::Needle as _;
/// seqfind! {
///     const NEEDLE = hex("78 9A BC");
///     const TATA = text("TATA");
/// }
/// # fn main() {
/// let haystack = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE];
/// let matched = NEEDLE.find(&haystack).unwrap();
/// assert_eq!(&haystack[matched.range()], [0x78, 0x9A, 0xBC]);
/// assert_eq!(TATA.find("GGCTATAAAAG").unwrap().start(), 3);
/// # }
/// ```
#[proc_macro]
pub fn seqfind(input: TokenStream) -> TokenStream {
    let Items(items) = parse_macro_input!(input as Items);
    items.into_iter().map(Item::into_tokens).collect::<TokenStream2>().into()
}
