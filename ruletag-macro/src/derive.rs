use crate::rule_check::validate_rule_string;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, Index, LitStr, Path, parse_macro_input,
    parse_quote,
};

/// Parsed field attributes
#[derive(Default)]
struct FieldAttrs {
    validate: Option<LitStr>,
    binding: Option<LitStr>,
    skip: bool,
}

impl FieldAttrs {
    fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if attr.path().is_ident("validate") {
                if let Ok(lit) = attr.parse_args::<LitStr>() {
                    result.validate = Some(lit);
                    continue;
                }
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        result.skip = true;
                        return Ok(());
                    }
                    if meta.path.is_ident("rules") {
                        result.validate = Some(meta.value()?.parse()?);
                        return Ok(());
                    }
                    Err(meta.error("expected a rule string, `rules = \"...\"` or `skip`"))
                })?;
            } else if attr.path().is_ident("binding") {
                result.binding = Some(attr.parse_args::<LitStr>()?);
            }
        }

        Ok(result)
    }

    /// `validate` wins unless it is missing or empty, then `binding` applies.
    fn rules(&self) -> Option<&LitStr> {
        match &self.validate {
            Some(lit) if !lit.value().is_empty() => Some(lit),
            _ => self.binding.as_ref().or(self.validate.as_ref()),
        }
    }
}

/// Path used by generated code, overridable with `#[validate(crate = "...")]`.
fn crate_path(attrs: &[Attribute]) -> syn::Result<Path> {
    let mut path: Path = parse_quote!(::ruletag_validation);

    for attr in attrs.iter().filter(|a| a.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                path = lit.parse()?;
                return Ok(());
            }
            Err(meta.error("expected `crate = \"...\"`"))
        })?;
    }

    Ok(path)
}

pub fn derive_validate_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let krate = crate_path(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Validate can only be derived for structs",
            ));
        }
    };

    let mut entries = Vec::new();
    let mut field_types = Vec::new();

    let members: Vec<_> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|f| {
                let ident = f.ident.as_ref()?;
                Some((f, ident.to_string(), quote!(#ident)))
            })
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let index = Index::from(i);
                (f, i.to_string(), quote!(#index))
            })
            .collect(),
        Fields::Unit => Vec::new(),
    };

    for (field, field_name, member) in members {
        let attrs = FieldAttrs::from_attributes(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let entry = match attrs.rules() {
            Some(lit) => {
                validate_rule_string(&lit.value(), lit.span())?;
                quote! {{
                    static RULES: #krate::__private::Lazy<
                        ::core::result::Result<#krate::RuleSet, #krate::RuleError>,
                    > = #krate::__private::Lazy::new(|| #krate::RuleSet::parse(#lit));
                    #krate::Field::new(
                        #field_name,
                        ::core::option::Option::Some(#lit),
                        &self.#member,
                    )
                    .with_parsed(&RULES)
                }}
            }
            None => quote! {
                #krate::Field::new(#field_name, ::core::option::Option::None, &self.#member)
            },
        };

        entries.push(entry);
        field_types.push(field.ty.clone());
    }

    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for ty in &field_types {
            where_clause
                .predicates
                .push(parse_quote!(#ty: #krate::FieldValue));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<#krate::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }

        impl #impl_generics #krate::FieldValue for #name #ty_generics #where_clause {
            fn field_value(&self) -> #krate::Value<'_> {
                #krate::Value::Record(self)
            }
        }
    })
}
