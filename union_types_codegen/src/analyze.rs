// union_types_codegen/src/analyze.rs

use itertools::Itertools;
use syn::{Attribute, FnArg, Ident, Pat, Result, Signature, Type, Visibility};

use crate::names;
use crate::parse::Member;
use crate::symbols::TypeSymbol;

/// Inherent methods generated on every union; no case may take their names.
const GENERATED_METHODS: &[&str] = &["case", "match_with", "match_or", "do_with", "do_or"];

#[derive(Clone)]
pub struct Parameter {
    /// The declared binding, possibly a raw identifier.
    pub ident: Ident,
    pub raw_name: String,
    pub pascal_name: String,
    pub snake_name: String,
    pub camel_name: String,
    pub ty: Type,
    /// Declared as `Option<_>`; absent on the wire means `None`.
    pub nullable: bool,
}

#[derive(Clone)]
pub struct Case {
    pub index: usize,
    /// The declared constructor name.
    pub ident: Ident,
    pub raw_name: String,
    pub pascal_name: String,
    pub snake_name: String,
    pub camel_name: String,
    /// The snake name, made safe for use as a binding.
    pub escaped_name: Ident,
    pub attrs: Vec<Attribute>,
    pub accessibility: Visibility,
    pub parameters: Vec<Parameter>,
    pub is_default: bool,
}

impl Case {
    pub fn is_nullary(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Cases with several parameters store them as one aggregate payload.
    pub fn emits_case_type(&self) -> bool {
        self.parameters.len() > 1
    }
}

pub struct Model {
    pub cases: Vec<Case>,
    /// Hand-written members, kept in declaration order.
    pub members: Vec<Member>,
}

impl Model {
    pub fn default_case(&self) -> Option<&Case> {
        self.cases.iter().find(|case| case.is_default)
    }
}

pub fn analyze(symbol: &TypeSymbol) -> Result<Model> {
    let mut cases = Vec::new();
    let mut members = Vec::new();

    for member in symbol.methods() {
        if !member.is_signature() {
            members.push(member.clone());
            continue;
        }
        if !is_case_signature(symbol, &member.sig) {
            tracing::trace!(
                "{}: skipping signature `{}`, not a case constructor",
                symbol.full_name(),
                member.sig.ident
            );
            continue;
        }
        cases.push(build_case(member)?);
    }

    reject_duplicate_names(&cases)?;
    reject_generated_names(&cases)?;
    for case in &cases {
        reject_duplicate_fields(case)?;
    }
    Ok(Model {
        cases: order_cases(cases),
        members,
    })
}

/// Static, non-generic, synchronous signatures returning exactly the
/// enclosing type.
pub fn is_case_signature(symbol: &TypeSymbol, sig: &Signature) -> bool {
    sig.generics.params.is_empty()
        && sig.generics.where_clause.is_none()
        && sig.asyncness.is_none()
        && sig.unsafety.is_none()
        && sig.abi.is_none()
        && sig.variadic.is_none()
        && sig.receiver().is_none()
        && symbol.is_self_return(&sig.output)
}

fn build_case(member: &Member) -> Result<Case> {
    let ident = member.sig.ident.clone();
    let raw_name = names::unraw(&ident);
    let snake_name = names::to_snake_case(&raw_name);
    let parameters = member
        .sig
        .inputs
        .iter()
        .map(build_parameter)
        .collect::<Result<Vec<_>>>()?;

    Ok(Case {
        index: 0,
        pascal_name: names::to_pascal_case(&raw_name),
        camel_name: names::to_camel_case(&raw_name),
        escaped_name: names::escape_if_keyword(&snake_name, ident.span()),
        snake_name,
        raw_name,
        ident,
        attrs: member.attrs.clone(),
        accessibility: member.vis.clone(),
        parameters,
        is_default: false,
    })
}

fn build_parameter(arg: &FnArg) -> Result<Parameter> {
    let FnArg::Typed(pat_type) = arg else {
        return Err(syn::Error::new_spanned(arg, "case constructors take no receiver"));
    };
    let Pat::Ident(pat_ident) = pat_type.pat.as_ref() else {
        return Err(syn::Error::new_spanned(
            &pat_type.pat,
            "case parameters must be plain identifiers",
        ));
    };
    if pat_ident.by_ref.is_some() || pat_ident.subpat.is_some() {
        return Err(syn::Error::new_spanned(
            pat_ident,
            "case parameters must be plain identifiers",
        ));
    }

    let ident = pat_ident.ident.clone();
    let raw_name = names::unraw(&ident);
    Ok(Parameter {
        pascal_name: names::to_pascal_case(&raw_name),
        snake_name: names::to_snake_case(&raw_name),
        camel_name: names::to_camel_case(&raw_name),
        raw_name,
        ident,
        nullable: is_option(&pat_type.ty),
        ty: (*pat_type.ty).clone(),
    })
}

fn is_option(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    type_path.qself.is_none()
        && type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option")
}

fn reject_duplicate_names(cases: &[Case]) -> Result<()> {
    match cases.iter().duplicates_by(|case| &case.pascal_name).next() {
        Some(duplicate) => Err(syn::Error::new_spanned(
            &duplicate.ident,
            format!(
                "duplicate case name `{}`: case names must be unique once converted to PascalCase",
                duplicate.pascal_name
            ),
        )),
        None => Ok(()),
    }
}

fn reject_generated_names(cases: &[Case]) -> Result<()> {
    match cases
        .iter()
        .find(|case| GENERATED_METHODS.contains(&case.raw_name.as_str()))
    {
        Some(case) => Err(syn::Error::new_spanned(
            &case.ident,
            format!(
                "case name `{}` collides with a generated method of the same name",
                case.raw_name
            ),
        )),
        None => Ok(()),
    }
}

/// Parameters of one case become the fields of one JSON object.
fn reject_duplicate_fields(case: &Case) -> Result<()> {
    match case
        .parameters
        .iter()
        .duplicates_by(|param| &param.camel_name)
        .next()
    {
        Some(duplicate) => Err(syn::Error::new_spanned(
            &duplicate.ident,
            format!(
                "duplicate field `{}` in case `{}`: parameter names must be unique once converted to camelCase",
                duplicate.camel_name, case.pascal_name
            ),
        )),
        None => Ok(()),
    }
}

/// Rejects parameters that would be written under the case field's key.
pub fn reject_case_field_clash(model: &Model, case_field: &str) -> Result<()> {
    let clash = model
        .cases
        .iter()
        .flat_map(|case| case.parameters.iter())
        .find(|param| param.camel_name == case_field);
    match clash {
        Some(param) => Err(syn::Error::new_spanned(
            &param.ident,
            format!(
                "parameter `{}` is written to the same JSON field as the case name; rename it or set another `case_field`",
                param.camel_name
            ),
        )),
        None => Ok(()),
    }
}

/// Marks the sole nullary case as default, moves it to the front and assigns
/// sequential indices. Ties between several nullary cases are not broken.
fn order_cases(mut cases: Vec<Case>) -> Vec<Case> {
    let nullary: Vec<usize> = cases
        .iter()
        .positions(|case| case.is_nullary())
        .collect();
    if let [only] = nullary.as_slice() {
        cases[*only].is_default = true;
    }

    // Stable sort keeps declaration order among the rest
    cases.sort_by_key(|case| !case.is_default);
    for (index, case) in cases.iter_mut().enumerate() {
        case.index = index;
    }
    cases
}
