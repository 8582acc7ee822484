//! 可注入组件派生宏实现

use crate::utils::{arc_inner_type, generate_unique_ident, is_instance_type, to_snake_case};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    spanned::Spanned, Attribute, Data, DeriveInput, Error, Expr, Field, Fields, Index, LitStr,
    Member, Result, Type,
};

/// 类型级别的构造方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructionKind {
    /// 按字段生成构造函数
    #[default]
    Fields,
    /// 通过 `Default` 构造，不声明构造函数
    Default,
    /// 不可实例化
    Abstract,
}

/// `#[injectable(...)]` 参数
#[derive(Debug, Clone, Default)]
pub struct InjectableArgs {
    pub construction: ConstructionKind,
}

impl InjectableArgs {
    /// 从结构体属性中解析
    pub fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = InjectableArgs::default();

        for attr in attrs {
            if !attr.path().is_ident("injectable") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let requested = if meta.path.is_ident("default") {
                    ConstructionKind::Default
                } else if meta.path.is_ident("abstract_type") {
                    ConstructionKind::Abstract
                } else {
                    return Err(meta.error("未知的 injectable 参数，可用: default, abstract_type"));
                };

                if args.construction != ConstructionKind::Fields
                    && args.construction != requested
                {
                    return Err(meta.error("default 与 abstract_type 不能同时使用"));
                }
                args.construction = requested;
                Ok(())
            })?;
        }

        Ok(args)
    }
}

/// 字段默认值
#[derive(Clone)]
pub enum FieldDefault {
    /// `#[inject(default)]`
    Implicit,
    /// `#[inject(default = expr)]`
    Expr(Box<Expr>),
}

/// `#[inject(...)]` 参数
#[derive(Clone, Default)]
pub struct InjectArgs {
    /// 依赖标识符，覆盖字段类型推导出的名称
    pub id: Option<String>,
    /// 默认值
    pub default: Option<FieldDefault>,
}

impl InjectArgs {
    /// 从字段属性中解析
    pub fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = InjectArgs::default();

        for attr in attrs {
            if !attr.path().is_ident("inject") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    let lit: LitStr = meta.value()?.parse()?;
                    args.id = Some(lit.value());
                } else if meta.path.is_ident("default") {
                    args.default = if meta.input.peek(syn::Token![=]) {
                        let expr: Expr = meta.value()?.parse()?;
                        Some(FieldDefault::Expr(Box::new(expr)))
                    } else {
                        Some(FieldDefault::Implicit)
                    };
                } else {
                    return Err(meta.error("未知的 inject 参数，可用: id, default"));
                }
                Ok(())
            })?;
        }

        Ok(args)
    }
}

/// 字段的注入方式
enum FieldKind<'a> {
    /// `Arc<T>`，按标识符解析依赖
    Shared(&'a Type),
    /// `Instance`，不声明类型
    Untyped,
    /// 其他类型，只能使用默认值
    Builtin,
}

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Injectable 不支持泛型类型，请为具体类型实现",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(Error::new(
                data.enum_token.span(),
                "Injectable 只能用于结构体",
            ))
        }
        Data::Union(data) => {
            return Err(Error::new(
                data.union_token.span(),
                "Injectable 只能用于结构体",
            ))
        }
    };

    let args = InjectableArgs::from_attributes(&input.attrs)?;

    let descriptor_body = match args.construction {
        ConstructionKind::Abstract => quote! {
            ::di_abstractions::TypeDescriptor::abstract_type(type_name)
        },
        ConstructionKind::Default => quote! {
            ::di_abstractions::TypeDescriptor::without_constructor(type_name, || {
                ::di_abstractions::Instance::new(<Self as ::std::default::Default>::default())
            })
        },
        ConstructionKind::Fields => generate_constructor(fields)?,
    };

    let registration_fn_name = generate_unique_ident(
        "register_injectable",
        &to_snake_case(&struct_name.to_string()),
    );

    Ok(quote! {
        impl ::di_abstractions::Injectable for #struct_name {
            fn descriptor() -> ::di_abstractions::TypeDescriptor {
                let type_name = <Self as ::di_abstractions::Injectable>::type_name();
                #descriptor_body
            }
        }

        // 程序启动时登记到全局类型目录
        #[::di_abstractions::ctor::ctor]
        fn #registration_fn_name() {
            ::di_abstractions::TypeCatalog::global().register_type::<#struct_name>();
        }
    })
}

/// 生成按字段构造的描述符
fn generate_constructor(fields: &Fields) -> Result<TokenStream> {
    if fields.is_empty() {
        let value = match fields {
            Fields::Named(_) => quote! { Self {} },
            Fields::Unnamed(_) => quote! { Self() },
            Fields::Unit => quote! { Self },
        };
        return Ok(quote! {
            ::di_abstractions::TypeDescriptor::without_constructor(type_name, || {
                ::di_abstractions::Instance::new(#value)
            })
        });
    }

    let mut parameters = Vec::with_capacity(fields.len());
    let mut initializers = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let (member, parameter_name) = field_member(field, index);
        let (parameter, value) = generate_field(field, &parameter_name)?;
        parameters.push(parameter);
        initializers.push(quote! { #member: #value });
    }

    Ok(quote! {
        ::di_abstractions::TypeDescriptor::with_constructor(
            type_name,
            ::std::vec![#(#parameters),*],
            move |arguments: ::std::vec::Vec<::di_abstractions::Instance>| {
                let mut args = ::di_abstractions::ConstructorArgs::new(type_name, arguments);
                ::std::result::Result::Ok(::di_abstractions::Instance::new(Self {
                    #(#initializers),*
                }))
            },
        )
    })
}

/// 字段访问成员与参数名，元组字段使用下标
fn field_member(field: &Field, index: usize) -> (Member, String) {
    match &field.ident {
        Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
        None => (
            Member::Unnamed(Index {
                index: index as u32,
                span: field.span(),
            }),
            index.to_string(),
        ),
    }
}

fn classify(ty: &Type) -> FieldKind<'_> {
    if let Some(inner) = arc_inner_type(ty) {
        FieldKind::Shared(inner)
    } else if is_instance_type(ty) {
        FieldKind::Untyped
    } else {
        FieldKind::Builtin
    }
}

/// 生成单个字段的参数描述与取值表达式
fn generate_field(field: &Field, parameter_name: &str) -> Result<(TokenStream, TokenStream)> {
    let args = InjectArgs::from_attributes(&field.attrs)?;
    let ty = &field.ty;

    match classify(ty) {
        FieldKind::Shared(inner) => {
            if args.default.is_some() {
                return Err(Error::new(
                    field.span(),
                    "Arc 依赖字段总是从容器解析，不能声明 default",
                ));
            }
            let dependency = match &args.id {
                Some(id) => quote! { #id },
                None => quote! { ::std::any::type_name::<#inner>() },
            };
            Ok((
                quote! { ::di_abstractions::ParameterInfo::named(#parameter_name, #dependency) },
                quote! { args.shared::<#inner>()? },
            ))
        }
        FieldKind::Untyped => {
            reject_id(field, &args)?;
            let parameter = quote! { ::di_abstractions::ParameterInfo::untyped(#parameter_name) };
            let parameter = match &args.default {
                None => parameter,
                Some(FieldDefault::Expr(expr)) => {
                    quote! { #parameter.with_default_instance(#expr) }
                }
                Some(FieldDefault::Implicit) => {
                    return Err(Error::new(
                        field.span(),
                        "Instance 字段需要显式的默认值: #[inject(default = ...)]",
                    ))
                }
            };
            Ok((parameter, quote! { args.instance()? }))
        }
        FieldKind::Builtin => {
            reject_id(field, &args)?;
            let parameter = quote! {
                ::di_abstractions::ParameterInfo::builtin(
                    #parameter_name,
                    ::std::any::type_name::<#ty>(),
                )
            };
            let parameter = match &args.default {
                None => parameter,
                Some(FieldDefault::Expr(expr)) => quote! { #parameter.with_default::<#ty>(#expr) },
                Some(FieldDefault::Implicit) => quote! {
                    #parameter.with_default::<#ty>(<#ty as ::std::default::Default>::default())
                },
            };
            Ok((parameter, quote! { args.owned::<#ty>()? }))
        }
    }
}

fn reject_id(field: &Field, args: &InjectArgs) -> Result<()> {
    if args.id.is_some() {
        return Err(Error::new(
            field.span(),
            "只有 Arc<T> 字段可以指定依赖标识符",
        ));
    }
    Ok(())
}
