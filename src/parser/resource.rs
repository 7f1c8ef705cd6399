//! The service root, the relative URI and resource paths (section 1).
//!
//! Without the service metadata most path segments could be read several
//! ways: `users/myid` is a key segment or a navigation, `GetTop(n=1)` a function
//! import or an entity set with a compound key. The parser settles each case
//! from the syntax around the segment; the comments above the rules say how.

use nom::branch::alt;
use nom::combinator::{map, not, opt, peek};
use nom::sequence::{pair, terminated, tuple};
use nom::Err;

use crate::combinator::{
    chain, exactly, lexeme, list, lit, lit_ci, lookahead, many, opt_some, prefixed, suffixed,
    PResult,
};
use crate::cst::resource::*;
use crate::cst::uri::Port;
use crate::cst::{Suffixed, Token};
use crate::error::SyntaxError;
use crate::input::Input;

use super::*;

// What may follow a navigation property or a function call for the segment to
// be read as a collection.
const COLLECTION_CONTINUATION: &[&str] = &["(", "%28", "/$count", "/$filter", "/$each"];

//* odataUri = serviceRoot [ odataRelativeUri ]
rule! {
    pub fn odataUri<'a>(input) -> OdataUri<'a> {
        let (input, (service_root, relative)) = pair(serviceRoot, opt(odataRelativeUri))(input)?;
        Ok((input, OdataUri { service_root, relative }))
    }
}

//* serviceRoot = ( "https" / "http" )                    ; Note: case-insensitive
//*               "://" host [ ":" port ]
//*               "/" *( segment-nz "/" )
//
// The path segments of the root look just like resource path segments. With a
// configured service root the rule reads exactly as many segments as the root
// has; otherwise it takes all it can, which leaves the last segment to the
// resource path.
rule! {
    pub fn serviceRoot<'a>(input) -> ServiceRoot<'a> {
        let start = input;
        let (input, scheme) = alt((lit_ci("https"), lit_ci("http")))(input)?;
        let (input, separator) = lit("://")(input)?;
        let (input, host) = host(input)?;
        let (input, port) = opt(map(pair(lit(":"), port), |(colon, digits)| Port {
            colon,
            digits,
        }))(input)?;
        let (input, slash) = lit("/")(input)?;
        let (input, segments) = match input.options().service_root.as_deref() {
            Some(root) => service_path(start, input, root)?,
            None => many(suffixed(segment_nz, "/"))(input)?,
        };
        Ok((
            input,
            ServiceRoot {
                scheme,
                separator,
                host,
                port,
                slash,
                segments,
            },
        ))
    }
}

/// Reads path segments until the text since `start` covers `root`, then checks
/// that text against it.
fn service_path<'a>(
    start: Input<'a>,
    mut input: Input<'a>,
    root: &str,
) -> PResult<'a, Vec<Suffixed<'a, Token<'a>>>> {
    let root = root.trim_end_matches('/');
    let mut segments = Vec::new();
    while input.offset() - start.offset() <= root.len() {
        match suffixed(segment_nz, "/")(input) {
            Ok((rest, segment)) => {
                segments.push(segment);
                input = rest;
            }
            Err(Err::Error(_)) => break,
            Err(error) => return Err(error),
        }
    }
    let read = &start.as_str()[..input.offset() - start.offset()];
    let mismatch = read
        .bytes()
        .zip(root.bytes())
        .position(|(found, expected)| !found.eq_ignore_ascii_case(&expected));
    match mismatch {
        None if read.len() == root.len() + 1 => Ok((input, segments)),
        Some(at) => Err(Err::Error(SyntaxError::at(start.offset() + at))),
        None => Err(Err::Error(SyntaxError::at(
            start.offset() + read.len().min(root.len()),
        ))),
    }
}

//* ; Note: dollar-prefixed path segments are case-sensitive!
//* odataRelativeUri = '$batch'  [ "?" batchOptions ]
//*                  / '$entity' "?" entityOptions
//*                  / '$entity' "/" qualifiedEntityTypeName "?" entityCastOptions
//*                  / '$metadata' [ "?" metadataOptions ] [ context ]
//*                  / resourcePath [ "?" queryOptions ]
rule! {
    pub fn odataRelativeUri<'a>(input) -> OdataRelativeUri<'a> {
        alt((
            map(
                pair(lit("$batch"), opt(prefixed("?", batchOptions))),
                |(keyword, options)| OdataRelativeUri::Batch(BatchUri { keyword, options }),
            ),
            map(
                tuple((lit("$entity"), lit("?"), entityOptions)),
                |(keyword, question_mark, options)| {
                    OdataRelativeUri::Entity(EntityUri {
                        keyword,
                        question_mark,
                        options,
                    })
                },
            ),
            map(
                tuple((
                    lit("$entity"),
                    prefixed("/", qualifiedEntityTypeName),
                    lit("?"),
                    entityCastOptions,
                )),
                |(keyword, cast, question_mark, options)| {
                    OdataRelativeUri::EntityCast(EntityCastUri {
                        keyword,
                        cast,
                        question_mark,
                        options,
                    })
                },
            ),
            map(
                tuple((
                    lit("$metadata"),
                    opt(prefixed("?", metadataOptions)),
                    opt(context),
                )),
                |(keyword, options, context)| {
                    OdataRelativeUri::Metadata(MetadataUri {
                        keyword,
                        options,
                        context,
                    })
                },
            ),
            map(
                pair(resourcePath, opt(prefixed("?", queryOptions))),
                |(path, options)| OdataRelativeUri::Resource(ResourceUri { path, options }),
            ),
        ))(input)
    }
}

//* ;------------------------------------------------------------------------------
//* ; 1. Resource Path
//* ;------------------------------------------------------------------------------
//*
//* resourcePath = entitySetName                  [ collectionNavigation ]
//*              / singletonEntity                [ singleNavigation ]
//*              / actionImportCall
//*              / entityColFunctionImportCall    [ collectionNavigation ]
//*              / entityFunctionImportCall       [ singleNavigation ]
//*              / complexColFunctionImportCall   [ complexColPath ]
//*              / complexFunctionImportCall      [ complexPath ]
//*              / primitiveColFunctionImportCall [ primitiveColPath ]
//*              / primitiveFunctionImportCall    [ primitivePath ]
//*              / functionImportCallNoParens
//*              / crossjoin
//*              / '$all'                         [ "/" qualifiedEntityTypeName ]
//
// An entity set name matches every identifier, so the first three
// alternatives may not stop in front of an opening parenthesis: `GetTop()` is
// left to the function import calls. A parenthesis that reads as a key
// (`GetTop(n=1)`) stays with the entity set.
rule! {
    pub fn resourcePath<'a>(input) -> ResourcePath<'a> {
        alt((
            map(
                terminated(chain(entitySetName, collectionNavigation), not(OPEN)),
                ResourcePath::EntitySet,
            ),
            map(
                terminated(chain(singletonEntity, singleNavigation), not(OPEN)),
                ResourcePath::Singleton,
            ),
            map(terminated(actionImportCall, not(OPEN)), ResourcePath::ActionImport),
            map(
                chain(entityColFunctionImportCall, collectionNavigation),
                ResourcePath::EntityColFunctionImport,
            ),
            map(
                chain(entityFunctionImportCall, singleNavigation),
                ResourcePath::EntityFunctionImport,
            ),
            map(
                chain(complexColFunctionImportCall, complexColPath),
                ResourcePath::ComplexColFunctionImport,
            ),
            map(
                chain(complexFunctionImportCall, complexPath),
                ResourcePath::ComplexFunctionImport,
            ),
            map(
                chain(primitiveColFunctionImportCall, primitiveColPath),
                ResourcePath::PrimitiveColFunctionImport,
            ),
            map(
                chain(primitiveFunctionImportCall, primitivePath),
                ResourcePath::PrimitiveFunctionImport,
            ),
            map(functionImportCallNoParens, ResourcePath::FunctionImportNoParens),
            map(crossjoin, ResourcePath::Crossjoin),
            map(
                pair(lit("$all"), opt(prefixed("/", qualifiedEntityTypeName))),
                |(keyword, cast)| ResourcePath::All(AllPath { keyword, cast }),
            ),
        ))(input)
    }
}

/// `[ "/" qualifiedEntityTypeName ]`, unless the name is a function call.
fn entity_cast(input: Input<'_>) -> PResult<'_, Option<EntityCast<'_>>> {
    opt(terminated(prefixed("/", qualifiedEntityTypeName), not(OPEN)))(input)
}

/// `[ "/" qualifiedComplexTypeName ]`, unless the name is a function call.
fn complex_cast(input: Input<'_>) -> PResult<'_, Option<ComplexCast<'_>>> {
    opt(terminated(prefixed("/", qualifiedComplexTypeName), not(OPEN)))(input)
}

//* collectionNavigation = [ "/" qualifiedEntityTypeName ] [ collectionNavPath ]
//
// A qualified name followed by parameters is a bound function, not a cast.
rule! {
    pub fn collectionNavigation<'a>(input) -> CollectionNavigation<'a> {
        let (input, cast) = entity_cast(input)?;
        let (input, path) = opt_some(collectionNavPath)(input)?;
        Ok((input, CollectionNavigation { cast, path }))
    }
}

//* collectionNavPath    = keyPredicate [ singleNavigation ]
//*                      / filterInPath [ collectionNavigation ]
//*                      / each [ boundOperation ]
//*                      / boundOperation
//*                      / count
//*                      / ref
//
// Key segments (`/<anything>`) would swallow every other alternative, so the key
// predicate is tried last.
rule! {
    pub recursive fn collectionNavPath<'a>(input) -> CollectionNavPath<'a> {
        alt((
            map(
                chain(filterInPath, map(collectionNavigation, Box::new)),
                CollectionNavPath::Filter,
            ),
            map(chain(each, boundOperation), CollectionNavPath::Each),
            map(boundOperation, CollectionNavPath::BoundOperation),
            map(count, CollectionNavPath::Count),
            map(ref_, CollectionNavPath::Ref),
            map(chain(keyPredicate, singleNavigation), CollectionNavPath::Key),
        ))(input)
    }
}

//* keyPredicate     = simpleKey / compoundKey / keyPathSegments
rule! {
    pub fn keyPredicate<'a>(input) -> KeyPredicate<'a> {
        alt((
            map(simpleKey, KeyPredicate::Simple),
            map(compoundKey, KeyPredicate::Compound),
            map(keyPathSegments, KeyPredicate::Segments),
        ))(input)
    }
}

//* simpleKey        = OPEN ( parameterAlias / keyPropertyValue ) CLOSE
rule! {
    pub fn simpleKey<'a>(input) -> SimpleKey<'a> {
        let (input, (open, value, close)) =
            tuple((OPEN, alias_or_literal(keyPropertyValue), CLOSE))(input)?;
        Ok((input, SimpleKey { open, value, close }))
    }
}

/// `parameterAlias / literal`
fn alias_or_literal<'a>(
    literal: impl Fn(Input<'a>) -> PResult<'a, KeyPropertyValue<'a>>,
) -> impl Fn(Input<'a>) -> PResult<'a, ParameterValueOrAlias<'a>> {
    move |input: Input<'a>| {
        alt((
            map(parameterAlias, ParameterValueOrAlias::Alias),
            map(&literal, ParameterValueOrAlias::Literal),
        ))(input)
    }
}

//* compoundKey      = OPEN keyValuePair *( COMMA keyValuePair ) CLOSE
rule! {
    pub fn compoundKey<'a>(input) -> CompoundKey<'a> {
        let (input, (open, pairs, close)) =
            tuple((OPEN, list(keyValuePair, COMMA), CLOSE))(input)?;
        Ok((input, CompoundKey { open, pairs, close }))
    }
}

//* keyValuePair     = ( primitiveKeyProperty / keyPropertyAlias  ) EQ ( parameterAlias / keyPropertyValue )
rule! {
    pub fn keyValuePair<'a>(input) -> KeyValuePair<'a> {
        let (input, (key, eq, value)) = tuple((
            alt((
                map(primitiveKeyProperty, KeyName::Property),
                map(keyPropertyAlias, KeyName::Alias),
            )),
            EQ,
            alias_or_literal(keyPropertyValue),
        ))(input)?;
        Ok((input, KeyValuePair { key, eq, value }))
    }
}

//* keyPropertyValue = primitiveLiteral
rule! {
    pub fn keyPropertyValue<'a>(input) -> KeyPropertyValue<'a> {
        primitiveLiteral(input)
    }
}

//* keyPropertyAlias = odataIdentifier
rule! {
    pub fn keyPropertyAlias<'a>(input) -> KeyPropertyAlias<'a> {
        let (input, identifier) = odataIdentifier(input)?;
        Ok((input, KeyPropertyAlias { identifier }))
    }
}

//* keyPathSegments  = 1*( "/" keyPathLiteral )
//
// Takes as many segments as the entity has key properties, which only the
// caller knows.
rule! {
    pub fn keyPathSegments<'a>(input) -> KeyPathSegments<'a> {
        let count = input.options().key_segments.max(1);
        let (input, segments) = exactly(count, prefixed("/", keyPathLiteral))(input)?;
        Ok((input, KeyPathSegments { segments }))
    }
}

//* keyPathLiteral   = *pchar
rule! {
    pub fn keyPathLiteral<'a>(input) -> KeyPathLiteral<'a> {
        let (input, text) = lexeme(many(pchar))(input)?;
        Ok((input, KeyPathLiteral { text }))
    }
}

//* singleNavigation = [ "/" qualifiedEntityTypeName ]
//*                    [ "/" propertyPath
//*                    / boundOperation
//*                    / ref
//*                    / value  ; request the media resource of a media entity
//*                    ]
rule! {
    pub fn singleNavigation<'a>(input) -> SingleNavigation<'a> {
        let (input, cast) = entity_cast(input)?;
        let (input, path) = opt_some(alt((
            map(boundOperation, SingleNavigationPath::BoundOperation),
            map(ref_, SingleNavigationPath::Ref),
            map(value, SingleNavigationPath::Value),
            map(
                prefixed("/", map(propertyPath, Box::new)),
                SingleNavigationPath::Property,
            ),
        )))(input)?;
        Ok((input, SingleNavigation { cast, path }))
    }
}

//* propertyPath = entityColNavigationProperty [ collectionNavigation ]
//*              / entityNavigationProperty    [ singleNavigation ]
//*              / complexColProperty          [ complexColPath ]
//*              / complexProperty             [ complexPath ]
//*              / primitiveColProperty        [ primitiveColPath ]
//*              / primitiveProperty           [ primitivePath ]
//*              / streamProperty              [ boundOperation ]
//
// All seven start with a bare identifier. A navigation is read as a collection
// when a key, `/$count`, `/$filter` or `/$each` follows, a complex collection
// when an ordinal index follows, and as a single-valued navigation otherwise.
// The remaining alternatives are kept for completeness; they never match.
rule! {
    pub recursive fn propertyPath<'a>(input) -> PropertyPath<'a> {
        alt((
            map(
                chain(
                    terminated(entityColNavigationProperty, lookahead(COLLECTION_CONTINUATION)),
                    collectionNavigation,
                ),
                PropertyPath::EntityColNavigation,
            ),
            map(
                chain(
                    terminated(complexColProperty, peek(pair(lit("/"), DIGIT))),
                    complexColPath,
                ),
                PropertyPath::ComplexColProperty,
            ),
            map(
                chain(entityNavigationProperty, singleNavigation),
                PropertyPath::EntityNavigation,
            ),
            map(chain(complexProperty, complexPath), PropertyPath::ComplexProperty),
            map(
                chain(primitiveColProperty, primitiveColPath),
                PropertyPath::PrimitiveColProperty,
            ),
            map(
                chain(primitiveProperty, primitivePath),
                PropertyPath::PrimitiveProperty,
            ),
            map(chain(streamProperty, boundOperation), PropertyPath::StreamProperty),
        ))(input)
    }
}

//* primitiveColPath = count / boundOperation / ordinalIndex
rule! {
    pub fn primitiveColPath<'a>(input) -> PrimitiveColPath<'a> {
        alt((
            map(count, PrimitiveColPath::Count),
            map(boundOperation, PrimitiveColPath::BoundOperation),
            map(ordinalIndex, PrimitiveColPath::OrdinalIndex),
        ))(input)
    }
}

//* primitivePath  = value / boundOperation
rule! {
    pub fn primitivePath<'a>(input) -> PrimitivePath<'a> {
        alt((
            map(value, PrimitivePath::Value),
            map(boundOperation, PrimitivePath::BoundOperation),
        ))(input)
    }
}

//* complexColPath = ordinalIndex
//*                / [ "/" qualifiedComplexTypeName ] [ count / boundOperation ]
rule! {
    pub fn complexColPath<'a>(input) -> ComplexColPath<'a> {
        alt((
            map(ordinalIndex, ComplexColPath::OrdinalIndex),
            map(
                pair(
                    complex_cast,
                    opt_some(alt((
                        map(count, ComplexColCastPath::Count),
                        map(boundOperation, ComplexColCastPath::BoundOperation),
                    ))),
                ),
                |(cast, path)| ComplexColPath::Cast(ComplexColCast { cast, path }),
            ),
        ))(input)
    }
}

//* complexPath    = [ "/" qualifiedComplexTypeName ]
//*                  [ "/" propertyPath
//*                  / boundOperation
//*                  ]
//
// `"/" propertyPath` would take the namespace of a bound operation for a
// property, so the operation goes first.
rule! {
    pub fn complexPath<'a>(input) -> ComplexPath<'a> {
        let (input, cast) = complex_cast(input)?;
        let (input, path) = opt_some(alt((
            map(boundOperation, ComplexPathTail::BoundOperation),
            map(
                prefixed("/", map(propertyPath, Box::new)),
                ComplexPathTail::Property,
            ),
        )))(input)?;
        Ok((input, ComplexPath { cast, path }))
    }
}

//* filterInPath = '/$filter' EQ parameterAlias
rule! {
    pub fn filterInPath<'a>(input) -> FilterInPath<'a> {
        let (input, (keyword, eq, alias)) = tuple((lit("/$filter"), EQ, parameterAlias))(input)?;
        Ok((input, FilterInPath { keyword, eq, alias }))
    }
}

//* each  = '/$each'
rule! {
    pub fn each<'a>(input) -> Each<'a> {
        let (input, text) = lit("/$each")(input)?;
        Ok((input, Each { text }))
    }
}

//* count = '/$count'
rule! {
    pub fn count<'a>(input) -> Count<'a> {
        let (input, text) = lit("/$count")(input)?;
        Ok((input, Count { text }))
    }
}

//* ref   = '/$ref'
rule! {
    pub fn ref_<'a>(input) -> Ref<'a> {
        let (input, text) = lit("/$ref")(input)?;
        Ok((input, Ref { text }))
    }
}

//* value = '/$value'
rule! {
    pub fn value<'a>(input) -> Value<'a> {
        let (input, text) = lit("/$value")(input)?;
        Ok((input, Value { text }))
    }
}

//* ordinalIndex = "/" 1*DIGIT
rule! {
    pub fn ordinalIndex<'a>(input) -> OrdinalIndex<'a> {
        let (input, (slash, index)) = pair(lit("/"), digits(1, None))(input)?;
        Ok((input, OrdinalIndex { slash, index }))
    }
}

//* ; boundOperation segments can only be composed if the type of the previous segment
//* ; matches the type of the first parameter of the action or function being called.
//* ; Note that the rule name reflects the return type of the function.
//* boundOperation = "/" ( boundActionCall
//*                      / boundEntityColFunctionCall    [ collectionNavigation ]
//*                      / boundEntityFunctionCall       [ singleNavigation ]
//*                      / boundComplexColFunctionCall   [ complexColPath ]
//*                      / boundComplexFunctionCall      [ complexPath ]
//*                      / boundPrimitiveColFunctionCall [ primitiveColPath ]
//*                      / boundPrimitiveFunctionCall    [ primitivePath ]
//*                      / boundFunctionCallNoParens
//*                      )
//
// The action call is a prefix of every function call and goes after them. A
// function result is a collection under the same condition as a navigation
// property (see `propertyPath`).
rule! {
    pub recursive fn boundOperation<'a>(input) -> BoundOperation<'a> {
        let (input, slash) = lit("/")(input)?;
        let (input, call) = alt((
            map(
                chain(
                    terminated(boundEntityColFunctionCall, lookahead(COLLECTION_CONTINUATION)),
                    map(collectionNavigation, Box::new),
                ),
                BoundCall::EntityColFunction,
            ),
            map(
                chain(boundEntityFunctionCall, map(singleNavigation, Box::new)),
                BoundCall::EntityFunction,
            ),
            map(
                chain(boundComplexColFunctionCall, map(complexColPath, Box::new)),
                BoundCall::ComplexColFunction,
            ),
            map(
                chain(boundComplexFunctionCall, map(complexPath, Box::new)),
                BoundCall::ComplexFunction,
            ),
            map(
                chain(boundPrimitiveColFunctionCall, map(primitiveColPath, Box::new)),
                BoundCall::PrimitiveColFunction,
            ),
            map(
                chain(boundPrimitiveFunctionCall, map(primitivePath, Box::new)),
                BoundCall::PrimitiveFunction,
            ),
            map(boundActionCall, BoundCall::Action),
            map(boundFunctionCallNoParens, BoundCall::NoParens),
        ))(input)?;
        Ok((input, BoundOperation { slash, call }))
    }
}

//* actionImportCall = actionImport
rule! {
    pub fn actionImportCall<'a>(input) -> ActionImportCall<'a> {
        actionImport(input)
    }
}

//* boundActionCall  = namespace "." action
//*                    ; with the added restriction that the binding parameter MUST be either an entity or collection of entities
//*                    ; and is specified by reference using the URI immediately preceding (to the left) of the boundActionCall
rule! {
    pub fn boundActionCall<'a>(input) -> BoundActionCall<'a> {
        qualified(action)(input)
    }
}

/// `name functionParameters`
fn call<'a, N>(
    name: impl Fn(Input<'a>) -> PResult<'a, N>,
) -> impl Fn(Input<'a>) -> PResult<'a, Call<'a, N>> {
    move |input: Input<'a>| {
        let (input, (name, parameters)) = pair(&name, functionParameters)(input)?;
        Ok((input, Call { name, parameters }))
    }
}

//* ; The following boundXxxFunctionCall rules have the added restrictions that
//* ;  - the function MUST support binding, and
//* ;  - the binding parameter type MUST match the type of resource identified by the
//* ;    URI immediately preceding (to the left) of the boundXxxFunctionCall, and
//* ;  - the functionParameters MUST NOT include the bindingParameter.
//* boundEntityFunctionCall       = namespace "." entityFunction       functionParameters
rule! {
    pub fn boundEntityFunctionCall<'a>(input) -> BoundEntityFunctionCall<'a> {
        call(qualified(entityFunction))(input)
    }
}

//* boundEntityColFunctionCall    = namespace "." entityColFunction    functionParameters
rule! {
    pub fn boundEntityColFunctionCall<'a>(input) -> BoundEntityColFunctionCall<'a> {
        call(qualified(entityColFunction))(input)
    }
}

//* boundComplexFunctionCall      = namespace "." complexFunction      functionParameters
rule! {
    pub fn boundComplexFunctionCall<'a>(input) -> BoundComplexFunctionCall<'a> {
        call(qualified(complexFunction))(input)
    }
}

//* boundComplexColFunctionCall   = namespace "." complexColFunction   functionParameters
rule! {
    pub fn boundComplexColFunctionCall<'a>(input) -> BoundComplexColFunctionCall<'a> {
        call(qualified(complexColFunction))(input)
    }
}

//* boundPrimitiveFunctionCall    = namespace "." primitiveFunction    functionParameters
rule! {
    pub fn boundPrimitiveFunctionCall<'a>(input) -> BoundPrimitiveFunctionCall<'a> {
        call(qualified(primitiveFunction))(input)
    }
}

//* boundPrimitiveColFunctionCall = namespace "." primitiveColFunction functionParameters
rule! {
    pub fn boundPrimitiveColFunctionCall<'a>(input) -> BoundPrimitiveColFunctionCall<'a> {
        call(qualified(primitiveColFunction))(input)
    }
}

//* boundFunctionCallNoParens     = namespace "." entityFunction
//*                               / namespace "." entityColFunction
//*                               / namespace "." complexFunction
//*                               / namespace "." complexColFunction
//*                               / namespace "." primitiveFunction
//*                               / namespace "." primitiveColFunction
rule! {
    pub fn boundFunctionCallNoParens<'a>(input) -> BoundFunctionCallNoParens<'a> {
        alt((
            map(qualified(entityFunction), BoundFunctionCallNoParens::Entity),
            map(qualified(entityColFunction), BoundFunctionCallNoParens::EntityCol),
            map(qualified(complexFunction), BoundFunctionCallNoParens::Complex),
            map(qualified(complexColFunction), BoundFunctionCallNoParens::ComplexCol),
            map(qualified(primitiveFunction), BoundFunctionCallNoParens::Primitive),
            map(qualified(primitiveColFunction), BoundFunctionCallNoParens::PrimitiveCol),
        ))(input)
    }
}

//* entityFunctionImportCall       = entityFunctionImport       functionParameters
rule! {
    pub fn entityFunctionImportCall<'a>(input) -> EntityFunctionImportCall<'a> {
        call(entityFunctionImport)(input)
    }
}

//* entityColFunctionImportCall    = entityColFunctionImport    functionParameters
rule! {
    pub fn entityColFunctionImportCall<'a>(input) -> EntityColFunctionImportCall<'a> {
        call(entityColFunctionImport)(input)
    }
}

//* complexFunctionImportCall      = complexFunctionImport      functionParameters
rule! {
    pub fn complexFunctionImportCall<'a>(input) -> ComplexFunctionImportCall<'a> {
        call(complexFunctionImport)(input)
    }
}

//* complexColFunctionImportCall   = complexColFunctionImport   functionParameters
rule! {
    pub fn complexColFunctionImportCall<'a>(input) -> ComplexColFunctionImportCall<'a> {
        call(complexColFunctionImport)(input)
    }
}

//* primitiveFunctionImportCall    = primitiveFunctionImport    functionParameters
rule! {
    pub fn primitiveFunctionImportCall<'a>(input) -> PrimitiveFunctionImportCall<'a> {
        call(primitiveFunctionImport)(input)
    }
}

//* primitiveColFunctionImportCall = primitiveColFunctionImport functionParameters
rule! {
    pub fn primitiveColFunctionImportCall<'a>(input) -> PrimitiveColFunctionImportCall<'a> {
        call(primitiveColFunctionImport)(input)
    }
}

//* functionImportCallNoParens     = entityFunctionImport
//*                                / entityColFunctionImport
//*                                / complexFunctionImport
//*                                / complexColFunctionImport
//*                                / primitiveFunctionImport
//*                                / primitiveColFunctionImport
rule! {
    pub fn functionImportCallNoParens<'a>(input) -> FunctionImportCallNoParens<'a> {
        alt((
            map(entityFunctionImport, FunctionImportCallNoParens::Entity),
            map(entityColFunctionImport, FunctionImportCallNoParens::EntityCol),
            map(complexFunctionImport, FunctionImportCallNoParens::Complex),
            map(complexColFunctionImport, FunctionImportCallNoParens::ComplexCol),
            map(primitiveFunctionImport, FunctionImportCallNoParens::Primitive),
            map(primitiveColFunctionImport, FunctionImportCallNoParens::PrimitiveCol),
        ))(input)
    }
}

//* functionParameters = OPEN [ functionParameter *( COMMA functionParameter ) ] CLOSE
rule! {
    pub fn functionParameters<'a>(input) -> FunctionParameters<'a> {
        let (input, (open, parameters, close)) =
            tuple((OPEN, opt(list(functionParameter, COMMA)), CLOSE))(input)?;
        Ok((input, FunctionParameters { open, parameters, close }))
    }
}

//* functionParameter  = parameterName EQ ( parameterAlias / primitiveLiteral )
rule! {
    pub fn functionParameter<'a>(input) -> FunctionParameter<'a> {
        let (input, (name, eq, value)) =
            tuple((parameterName, EQ, alias_or_literal(primitiveLiteral)))(input)?;
        Ok((input, FunctionParameter { name, eq, value }))
    }
}

//* parameterName      = odataIdentifier
rule! {
    pub fn parameterName<'a>(input) -> ParameterName<'a> {
        let (input, identifier) = odataIdentifier(input)?;
        Ok((input, ParameterName { identifier }))
    }
}

//* parameterAlias     = AT odataIdentifier
rule! {
    pub fn parameterAlias<'a>(input) -> ParameterAlias<'a> {
        let (input, (at, name)) = pair(AT, odataIdentifier)(input)?;
        Ok((input, ParameterAlias { at, name }))
    }
}

//* crossjoin = '$crossjoin' OPEN
//*             entitySetName *( COMMA entitySetName )
//*             CLOSE
rule! {
    pub fn crossjoin<'a>(input) -> Crossjoin<'a> {
        let (input, (keyword, open, entity_sets, close)) = tuple((
            lit("$crossjoin"),
            OPEN,
            list(entitySetName, COMMA),
            CLOSE,
        ))(input)?;
        Ok((
            input,
            Crossjoin {
                keyword,
                open,
                entity_sets,
                close,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::literal::PrimitiveLiteral;
    use crate::cst::{Chain, Syntax};
    use crate::options::ParseOptions;

    fn parse_path(text: &str) -> ResourcePath<'_> {
        let (rest, path) = resourcePath(Input::new(text)).unwrap();
        assert!(rest.is_empty(), "unparsed {:?}", rest.as_str());
        assert_eq!(path.to_source(), text);
        path
    }

    fn collection_path<'p, 'a>(path: &'p ResourcePath<'a>) -> &'p CollectionNavPath<'a> {
        match path {
            ResourcePath::EntitySet(Chain {
                tail: Some(CollectionNavigation { path: Some(path), .. }),
                ..
            }) => path,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn key_segment_then_navigations() {
        let path = parse_path("users/myid/calendar/events");
        let (key, navigation) = match collection_path(&path) {
            CollectionNavPath::Key(Chain { head, tail: Some(tail) }) => (head, tail),
            other => panic!("unexpected {other:?}"),
        };
        match key {
            KeyPredicate::Segments(key) => {
                assert_eq!(key.segments.len(), 1);
                assert_eq!(key.segments[0].value.as_str(), "myid");
            }
            other => panic!("unexpected {other:?}"),
        }

        let mut names = Vec::new();
        let mut navigation = Some(navigation);
        while let Some(SingleNavigation {
            path: Some(SingleNavigationPath::Property(property)),
            ..
        }) = navigation
        {
            match &*property.value {
                PropertyPath::EntityNavigation(Chain { head, tail }) => {
                    names.push(head.name());
                    navigation = tail.as_ref();
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(names, vec!["calendar", "events"]);
    }

    #[test]
    fn parenthesized_keys() {
        let path = parse_path("People('russellwhyte')");
        match collection_path(&path) {
            CollectionNavPath::Key(Chain {
                head: KeyPredicate::Simple(key),
                tail: None,
            }) => assert!(matches!(
                key.value,
                ParameterValueOrAlias::Literal(PrimitiveLiteral::String(_))
            )),
            other => panic!("unexpected {other:?}"),
        }

        let path = parse_path("OrderItems(OrderID=1,ItemNo=@item)");
        match collection_path(&path) {
            CollectionNavPath::Key(Chain {
                head: KeyPredicate::Compound(key),
                ..
            }) => {
                assert_eq!(key.pairs.len(), 2);
                let last = key.pairs.iter().last().unwrap();
                assert!(matches!(&last.value, ParameterValueOrAlias::Alias(alias) if alias.name() == "item"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn key_segments_follow_the_options() {
        let options = ParseOptions::default().with_key_segments(2);
        let (rest, path) = resourcePath(Input::with_options("Sales/2024/EMEA/Total", &options)).unwrap();
        assert!(rest.is_empty());
        match collection_path(&path) {
            CollectionNavPath::Key(Chain {
                head: KeyPredicate::Segments(key),
                tail: Some(_),
            }) => assert_eq!(key.segments.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn count_ref_and_filter_segments() {
        assert!(matches!(
            collection_path(&parse_path("users/$count")),
            CollectionNavPath::Count(_)
        ));
        assert!(matches!(
            collection_path(&parse_path("users/$ref")),
            CollectionNavPath::Ref(_)
        ));
        assert!(matches!(
            collection_path(&parse_path("users/$filter=@f/$count")),
            CollectionNavPath::Filter(Chain { tail: Some(_), .. })
        ));
    }

    #[test]
    fn navigation_to_a_collection() {
        let path = parse_path("users('a')/messages/$count");
        let navigation = match collection_path(&path) {
            CollectionNavPath::Key(Chain { tail: Some(tail), .. }) => tail,
            other => panic!("unexpected {other:?}"),
        };
        match &navigation.path {
            Some(SingleNavigationPath::Property(property)) => assert!(matches!(
                &*property.value,
                PropertyPath::EntityColNavigation(Chain { tail: Some(_), .. })
            )),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn casts_and_bound_operations() {
        let path = parse_path("People/Microsoft.Demo.Employee/Microsoft.Demo.GetPeers()");
        let navigation = match &path {
            ResourcePath::EntitySet(Chain { tail: Some(navigation), .. }) => navigation,
            other => panic!("unexpected {other:?}"),
        };
        let cast = navigation.cast.as_ref().unwrap();
        assert_eq!(cast.value.name.name(), "Employee");
        match &navigation.path {
            Some(CollectionNavPath::BoundOperation(operation)) => match &operation.call {
                BoundCall::EntityFunction(Chain { head, .. }) => {
                    assert_eq!(head.name.name.name(), "GetPeers");
                    assert!(head.parameters.iter().next().is_none());
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }

        let path = parse_path("Airlines('AA')/Demo.Actions.Reset");
        assert!(matches!(
            collection_path(&path),
            CollectionNavPath::Key(Chain { tail: Some(SingleNavigation { cast: Some(_), path: None }), .. })
        ));
    }

    #[test]
    fn function_imports_need_parentheses() {
        match parse_path("GetNearestAirport(lat=33,lon=-118)") {
            ResourcePath::EntitySet(_) => {}
            other => panic!("unexpected {other:?}"),
        }
        match parse_path("GetAll()/$count") {
            ResourcePath::EntityColFunctionImport(Chain { head, tail: Some(_) }) => {
                assert_eq!(head.name.name(), "GetAll");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn crossjoin_and_all() {
        match parse_path("$crossjoin(Products,Sales)") {
            ResourcePath::Crossjoin(crossjoin) => assert_eq!(
                crossjoin.entity_sets.iter().map(|set| set.name()).collect::<Vec<_>>(),
                vec!["Products", "Sales"]
            ),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse_path("$all/Model.Customer"),
            ResourcePath::All(AllPath { cast: Some(_), .. })
        ));
    }

    #[test]
    fn service_root_takes_every_segment_by_default() {
        let (rest, root) = serviceRoot(Input::new("HTTPS://host:8080/a/b/c")).unwrap();
        assert_eq!(root.segments.len(), 2);
        assert_eq!(root.port.map(|port| port.digits.text()), Some("8080"));
        assert_eq!(rest.as_str(), "c");
    }

    #[test]
    fn service_root_follows_the_options() {
        let options =
            ParseOptions::default().with_service_root("https://graph.microsoft.com/v1.0");
        let text = "https://Graph.Microsoft.com/v1.0/users/myid/calendar";
        let (rest, uri) = odataUri(Input::with_options(text, &options)).unwrap();
        assert!(rest.is_empty());
        assert_eq!(uri.service_root.segments.len(), 1);
        assert_eq!(uri.service_root.to_source(), "https://Graph.Microsoft.com/v1.0/");
        assert!(matches!(uri.relative, Some(OdataRelativeUri::Resource(_))));
        assert_eq!(uri.to_source(), text);

        match serviceRoot(Input::with_options("https://graph.microsoft.com/beta/users", &options)) {
            Err(Err::Error(error)) => assert_eq!(error.offset, 28),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn dollar_segments_are_case_sensitive() {
        assert!(odataRelativeUri(Input::new("$metadata")).is_ok());
        assert!(odataRelativeUri(Input::new("$Metadata")).is_err());
        assert!(odataRelativeUri(Input::new("$crossjoin(A)")).is_ok());
    }
}
