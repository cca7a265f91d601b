use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitBool, LitInt, LitStr, Type, parse_macro_input, spanned::Spanned};

#[proc_macro_derive(Entity, attributes(table, id, column, transient))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_entity(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Default)]
struct ColumnOptions {
    name: Option<LitStr>,
    insertable: Option<bool>,
    nullable: Option<bool>,
    length: Option<u32>,
}

#[derive(Default)]
struct IdOptions {
    generated: bool,
}

struct FieldSpec {
    ident: Ident,
    ty: Type,
    transient: bool,
    id: Option<IdOptions>,
    column: ColumnOptions,
}

impl FieldSpec {
    fn field_name(&self) -> String {
        self.ident.unraw().to_string()
    }

    fn column_name(&self) -> String {
        self.column
            .name
            .as_ref()
            .map(LitStr::value)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.field_name())
    }
}

fn expand_entity(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            input.generics,
            "Entity cannot be derived for generic structs",
        ));
    }

    let table_name = parse_table_name(&input.attrs)?;

    let data_struct = match input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Entity can only be derived for structs",
            ));
        }
    };

    let named_fields = match data_struct.fields {
        Fields::Named(fields) => fields,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Entity requires named fields",
            ));
        }
    };

    let mut fields = Vec::<FieldSpec>::new();
    for field in named_fields.named {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "Entity requires named fields"))?;
        fields.push(parse_field(ident, field.ty, &field.attrs)?);
    }

    let mapped: Vec<&FieldSpec> = fields.iter().filter(|f| !f.transient).collect();

    let table_call = table_name.map(|name| quote! { .table(#name) });

    let field_descriptors = mapped.iter().map(|field| {
        let name = field.field_name();
        let ty = &field.ty;

        let id_call = field.id.as_ref().map(|id| {
            let generated = id.generated.then(|| quote! { .generated() });
            quote! { .id() #generated }
        });
        let column_call = field.column.name.as_ref().map(|name| quote! { .column(#name) });
        let insertable_call = field
            .column
            .insertable
            .map(|value| quote! { .insertable(#value) });
        let nullable_call = field.column.nullable.map(|value| quote! { .nullable(#value) });
        let length_call = field.column.length.map(|value| quote! { .length(#value) });

        quote! {
            .field(
                ::rustmemorm::mapping::FieldDescriptor::new(
                    #name,
                    <#ty as ::rustmemorm::mapping::ColumnValue>::field_type(),
                )
                #id_call
                #column_call
                #insertable_call
                #nullable_call
                #length_call
            )
        }
    });

    let value_arms = mapped.iter().map(|field| {
        let name = field.field_name();
        let ident = &field.ident;
        quote! {
            #name => ::std::option::Option::Some(
                ::rustmemorm::mapping::ColumnValue::to_value(&self.#ident)
            ),
        }
    });

    let field_inits = fields.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        if field.transient {
            quote! { #ident: ::std::default::Default::default() }
        } else {
            let column = field.column_name();
            quote! { #ident: row.get::<#ty>(#column)? }
        }
    });

    Ok(quote! {
        impl ::rustmemorm::mapping::Entity for #struct_name {
            fn descriptor() -> ::rustmemorm::mapping::EntityDescriptor {
                ::rustmemorm::mapping::EntityDescriptor::new(
                    concat!(module_path!(), "::", stringify!(#struct_name)),
                )
                .entity()
                #table_call
                #(#field_descriptors)*
            }

            fn field_value(&self, field_name: &str) -> ::std::option::Option<::rustmemorm::core::Value> {
                match field_name {
                    #(#value_arms)*
                    _ => ::std::option::Option::None,
                }
            }

            fn from_row(
                row: &::rustmemorm::result::ResultRow<'_>,
            ) -> ::rustmemorm::core::Result<Self> {
                ::std::result::Result::Ok(Self {
                    #(#field_inits,)*
                })
            }
        }
    })
}

fn parse_table_name(attrs: &[syn::Attribute]) -> syn::Result<Option<LitStr>> {
    let mut table_name = None;

    for attr in attrs {
        if !attr.path().is_ident("table") {
            continue;
        }

        if table_name.is_some() {
            return Err(syn::Error::new(attr.span(), "Duplicate #[table(...)] attribute"));
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value = meta.value()?;
                let lit: LitStr = value.parse()?;
                table_name = Some(lit);
                return Ok(());
            }
            Err(meta.error("Unsupported #[table(...)] option. Supported: name = \"...\""))
        })?;
    }

    Ok(table_name)
}

fn parse_field(ident: Ident, ty: Type, attrs: &[syn::Attribute]) -> syn::Result<FieldSpec> {
    let mut transient = false;
    let mut id: Option<IdOptions> = None;
    let mut column: Option<ColumnOptions> = None;

    for attr in attrs {
        if attr.path().is_ident("transient") {
            attr.meta.require_path_only()?;
            transient = true;
        } else if attr.path().is_ident("id") {
            if id.is_some() {
                return Err(syn::Error::new(attr.span(), "Duplicate #[id] attribute on field"));
            }
            let mut parsed = IdOptions::default();
            if let syn::Meta::List(list) = &attr.meta {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("generated") {
                        parsed.generated = true;
                        return Ok(());
                    }
                    Err(meta.error("Unsupported #[id(...)] option. Supported: generated"))
                })?;
            } else {
                attr.meta.require_path_only()?;
            }
            id = Some(parsed);
        } else if attr.path().is_ident("column") {
            if column.is_some() {
                return Err(syn::Error::new(
                    attr.span(),
                    "Duplicate #[column(...)] attribute on field",
                ));
            }
            column = Some(parse_column_options(attr)?);
        }
    }

    if transient && (id.is_some() || column.is_some()) {
        return Err(syn::Error::new(
            ident.span(),
            "#[transient] fields cannot carry #[id] or #[column(...)]",
        ));
    }

    Ok(FieldSpec {
        ident,
        ty,
        transient,
        id,
        column: column.unwrap_or_default(),
    })
}

fn parse_column_options(attr: &syn::Attribute) -> syn::Result<ColumnOptions> {
    let mut options = ColumnOptions::default();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let value = meta.value()?;
            options.name = Some(value.parse::<LitStr>()?);
            return Ok(());
        }

        if meta.path.is_ident("insertable") {
            let value = meta.value()?;
            options.insertable = Some(value.parse::<LitBool>()?.value);
            return Ok(());
        }

        if meta.path.is_ident("nullable") {
            let value = meta.value()?;
            options.nullable = Some(value.parse::<LitBool>()?.value);
            return Ok(());
        }

        if meta.path.is_ident("length") {
            let value = meta.value()?;
            options.length = Some(value.parse::<LitInt>()?.base10_parse::<u32>()?);
            return Ok(());
        }

        Err(meta.error(
            "Unsupported #[column(...)] option. Supported: name = \"...\", insertable = bool, nullable = bool, length = <u32>",
        ))
    })?;

    Ok(options)
}
