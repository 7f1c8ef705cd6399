//! Expressions (section 4).

use nom::branch::alt;
use nom::combinator::{map, not, opt, peek, verify};
use nom::sequence::{pair, terminated, tuple};
use nom::Parser;

use crate::combinator::{chain, keyword, lit, lit_ci, list, lookahead, opt_some, prefixed, suffixed, traced, PResult};
use crate::cst::expr::*;
use crate::error::SyntaxError;
use crate::input::Input;

use super::query::option_list;
use super::*;

// What follows a navigation property or function call that reads as a
// collection: a key, `/$count` or a lambda operator.
const COLLECTION_PATH_START: &[&str] = &["(", "%28", "/$count", "/any(", "/any%28", "/all(", "/all%28"];

//* ;------------------------------------------------------------------------------
//* ; 4. Expressions
//* ;------------------------------------------------------------------------------
//*
//* ; Note: a boolCommonExpr is also a commonExpr, e.g. sort by Boolean
//* commonExpr = ( primitiveLiteral
//*              / arrayOrObject
//*              / rootExpr
//*              / firstMemberExpr
//*              / functionExpr
//*              / negateExpr
//*              / methodCallExpr
//*              / parenExpr
//*              / listExpr
//*              / castExpr
//*              / isofExpr
//*              / notExpr
//*              )
//*              [ addExpr
//*              / subExpr
//*              / mulExpr
//*              / divExpr
//*              / divbyExpr
//*              / modExpr
//*              ]
//*              [ eqExpr
//*              / neExpr
//*              / ltExpr
//*              / leExpr
//*              / gtExpr
//*              / geExpr
//*              / hasExpr
//*              / inExpr
//*              ]
//*              [ andExpr
//*              / orExpr
//*              ]
rule! {
    pub recursive fn commonExpr<'a>(input) -> CommonExpr<'a> {
        let (input, operand) = primary(input)?;
        let (input, arithmetic) = opt(alt((
            map(addExpr, ArithmeticExpr::Add),
            map(subExpr, ArithmeticExpr::Sub),
            map(mulExpr, ArithmeticExpr::Mul),
            map(divExpr, ArithmeticExpr::Div),
            map(divbyExpr, ArithmeticExpr::Divby),
            map(modExpr, ArithmeticExpr::Mod),
        )))(input)?;
        let (input, comparison) = opt(alt((
            map(eqExpr, ComparisonExpr::Eq),
            map(neExpr, ComparisonExpr::Ne),
            map(ltExpr, ComparisonExpr::Lt),
            map(leExpr, ComparisonExpr::Le),
            map(gtExpr, ComparisonExpr::Gt),
            map(geExpr, ComparisonExpr::Ge),
            map(hasExpr, ComparisonExpr::Has),
            map(inExpr, ComparisonExpr::In),
        )))(input)?;
        let (input, logical) = opt(alt((
            map(andExpr, LogicalExpr::And),
            map(orExpr, LogicalExpr::Or),
        )))(input)?;
        Ok((
            input,
            CommonExpr {
                operand,
                arithmetic,
                comparison,
                logical,
            },
        ))
    }
}

// Method calls, casts and `not` would otherwise be read as a property
// followed by a key, and a function call as a bound function member; so they
// go before `firstMemberExpr`.
fn primary(input: Input<'_>) -> PResult<'_, PrimaryExpr<'_>> {
    alt((
        map(primitiveLiteral, PrimaryExpr::Literal),
        map(arrayOrObject, PrimaryExpr::ArrayOrObject),
        map(rootExpr, PrimaryExpr::Root),
        map(methodCallExpr, PrimaryExpr::MethodCall),
        map(castExpr, PrimaryExpr::Cast),
        map(isofExpr, PrimaryExpr::Isof),
        map(notExpr, PrimaryExpr::Not),
        map(functionExpr, PrimaryExpr::Function),
        map(firstMemberExpr, PrimaryExpr::FirstMember),
        map(negateExpr, PrimaryExpr::Negate),
        map(parenExpr, PrimaryExpr::Paren),
        map(listExpr, PrimaryExpr::List),
    ))(input)
}

//* boolCommonExpr = commonExpr ; resulting in a Boolean
rule! {
    pub fn boolCommonExpr<'a>(input) -> BoolCommonExpr<'a> {
        commonExpr(input)
    }
}

//* rootExpr = '$root/' ( entitySetName keyPredicate / singletonEntity ) [ singleNavigationExpr ]
rule! {
    pub fn rootExpr<'a>(input) -> RootExpr<'a> {
        let (input, prefix) = lit("$root/")(input)?;
        let (input, target) = alt((
            map(pair(entitySetName, keyPredicate), |(entity_set, key)| {
                RootTarget::Entity(RootEntity { entity_set, key })
            }),
            map(singletonEntity, RootTarget::Singleton),
        ))(input)?;
        let (input, navigation) = opt(singleNavigationExpr)(input)?;
        Ok((
            input,
            RootExpr {
                prefix,
                target,
                navigation,
            },
        ))
    }
}

//* firstMemberExpr = memberExpr
//*                 / inscopeVariableExpr [ "/" memberExpr ]
//
// `$it`, `$this` and aliases go first: a member would take `@p` for an
// annotation. An `@` name followed by `.` or `#` is left to the annotation.
// Lambda variables cannot be told from properties and read as members.
rule! {
    pub fn firstMemberExpr<'a>(input) -> FirstMemberExpr<'a> {
        alt((
            map(
                chain(
                    alt((
                        map(implicitVariableExpr, InscopeVariableExpr::Implicit),
                        map(
                            terminated(parameterAlias, not(alt((lit("."), lit("#"))))),
                            InscopeVariableExpr::Alias,
                        ),
                    )),
                    singleNavigationExpr,
                ),
                FirstMemberExpr::Inscope,
            ),
            map(memberExpr, FirstMemberExpr::Member),
        ))(input)
    }
}

//* memberExpr = [ qualifiedEntityTypeName "/" ]
//*              ( propertyPathExpr
//*              / boundFunctionExpr
//*              / annotationExpr
//*              )
//
// A property would stop at the dot of a function name, so functions go first.
rule! {
    pub recursive fn memberExpr<'a>(input) -> MemberExpr<'a> {
        let (input, type_cast) = opt(suffixed(qualifiedEntityTypeName, "/"))(input)?;
        let (input, member) = alt((
            map(boundFunctionExpr, Member::BoundFunction),
            map(annotationExpr, Member::Annotation),
            map(propertyPathExpr, Member::PropertyPath),
        ))(input)?;
        Ok((input, MemberExpr { type_cast, member }))
    }
}

//* propertyPathExpr = ( entityColNavigationProperty [ collectionNavigationExpr ]
//*                    / entityNavigationProperty    [ singleNavigationExpr ]
//*                    / complexColProperty          [ complexColPathExpr ]
//*                    / complexProperty             [ complexPathExpr ]
//*                    / primitiveColProperty        [ collectionPathExpr ]
//*                    / primitiveProperty           [ primitivePathExpr ]
//*                    / streamProperty              [ primitivePathExpr ]
//*                    )
//
// All seven start with a bare identifier. A property followed by a key,
// `/$count` or a lambda is a collection navigation; one followed by any other
// path is complex; anything else is primitive. The other alternatives never
// match.
rule! {
    pub recursive fn propertyPathExpr<'a>(input) -> PropertyPathExpr<'a> {
        alt((
            map(
                chain(
                    terminated(entityColNavigationProperty, collection_follows),
                    map(collectionNavigationExpr, Box::new),
                ),
                PropertyPathExpr::EntityColNavigation,
            ),
            map(
                chain(
                    terminated(complexProperty, path_follows),
                    map(complexPathExpr, Box::new),
                ),
                PropertyPathExpr::ComplexProperty,
            ),
            map(
                chain(primitiveProperty, map(primitivePathExpr, Box::new)),
                PropertyPathExpr::PrimitiveProperty,
            ),
            map(
                chain(entityNavigationProperty, singleNavigationExpr),
                PropertyPathExpr::EntityNavigation,
            ),
            map(
                chain(complexColProperty, map(complexColPathExpr, Box::new)),
                PropertyPathExpr::ComplexColProperty,
            ),
            map(
                chain(primitiveColProperty, map(collectionPathExpr, Box::new)),
                PropertyPathExpr::PrimitiveColProperty,
            ),
            map(
                chain(streamProperty, map(primitivePathExpr, Box::new)),
                PropertyPathExpr::StreamProperty,
            ),
        ))(input)
    }
}

fn collection_follows(input: Input<'_>) -> PResult<'_, ()> {
    alt((
        lookahead(COLLECTION_PATH_START),
        map(
            peek(tuple((
                lit("/"),
                qualifiedEntityTypeName,
                lookahead(COLLECTION_PATH_START),
            ))),
            |_| (),
        ),
    ))(input)
}

fn path_follows(input: Input<'_>) -> PResult<'_, ()> {
    map(peek(lit("/")), |_| ())(input)
}

fn anything(input: Input<'_>) -> PResult<'_, ()> {
    Ok((input, ()))
}

//* annotationExpr = annotation
//*                  [ collectionPathExpr
//*                  / singleNavigationExpr
//*                  / complexPathExpr
//*                  / primitivePathExpr
//*                  ]
rule! {
    pub recursive fn annotationExpr<'a>(input) -> AnnotationExpr<'a> {
        chain(
            annotation,
            map(
                alt((
                    map(collectionPathExpr, AnnotationPath::Collection),
                    map(singleNavigationExpr, AnnotationPath::SingleNavigation),
                    map(
                        verify(complexPathExpr, |path: &ComplexPathExpr<'_>| {
                            path.cast.is_some() || path.path.is_some()
                        }),
                        AnnotationPath::Complex,
                    ),
                    map(primitivePathExpr, AnnotationPath::Primitive),
                )),
                Box::new,
            ),
        )(input)
    }
}

//* annotation          = AT [ namespace "." ] termName [ '#' annotationQualifier ]
rule! {
    pub fn annotation<'a>(input) -> Annotation<'a> {
        let (input, (at, namespace, term, qualifier)) = tuple((
            AT,
            opt(suffixed(namespace, ".")),
            termName,
            opt(prefixed("#", annotationQualifier)),
        ))(input)?;
        Ok((
            input,
            Annotation {
                at,
                namespace,
                term,
                qualifier,
            },
        ))
    }
}

//* annotationQualifier = odataIdentifier
rule! {
    pub fn annotationQualifier<'a>(input) -> AnnotationQualifier<'a> {
        let (input, identifier) = odataIdentifier(input)?;
        Ok((input, AnnotationQualifier { identifier }))
    }
}

//* inscopeVariableExpr  = implicitVariableExpr
//*                      / parameterAlias
//*                      / lambdaVariableExpr ; only allowed inside a lambdaPredicateExpr
rule! {
    pub fn inscopeVariableExpr<'a>(input) -> InscopeVariableExpr<'a> {
        alt((
            map(implicitVariableExpr, InscopeVariableExpr::Implicit),
            map(parameterAlias, InscopeVariableExpr::Alias),
            map(lambdaVariableExpr, InscopeVariableExpr::Lambda),
        ))(input)
    }
}

//* implicitVariableExpr = '$it'              ; the current instance of the resource identified by the resource path
//*                      / '$this'            ; the instance on which the query option is evaluated
pub fn implicitVariableExpr(input: Input<'_>) -> PResult<'_, crate::cst::Token<'_>> {
    alt((keyword("$it"), keyword("$this")))(input)
}

//* lambdaVariableExpr   = odataIdentifier
rule! {
    pub fn lambdaVariableExpr<'a>(input) -> LambdaVariableExpr<'a> {
        let (input, identifier) = odataIdentifier(input)?;
        Ok((input, LambdaVariableExpr { identifier }))
    }
}

//* collectionNavigationExpr = [ "/" qualifiedEntityTypeName ]
//*                            [ keyPredicate [ singleNavigationExpr ]
//*                            / collectionPathExpr
//*                            ]
//
// `keyPathSegments` would take `/$count` for a key, so the collection path
// goes first.
rule! {
    pub fn collectionNavigationExpr<'a>(input) -> CollectionNavigationExpr<'a> {
        let (input, cast) = opt(terminated(prefixed("/", qualifiedEntityTypeName), not(OPEN)))(input)?;
        let (input, path) = opt(alt((
            map(collectionPathExpr, CollectionNavigationPath::Collection),
            map(chain(keyPredicate, singleNavigationExpr), CollectionNavigationPath::Key),
        )))(input)?;
        Ok((input, CollectionNavigationExpr { cast, path }))
    }
}

//* singleNavigationExpr = "/" memberExpr
rule! {
    pub fn singleNavigationExpr<'a>(input) -> SingleNavigationExpr<'a> {
        prefixed("/", map(memberExpr, Box::new))(input)
    }
}

//* complexColPathExpr = [ "/" qualifiedComplexTypeName ]
//*                      [ collectionPathExpr ]
rule! {
    pub fn complexColPathExpr<'a>(input) -> ComplexColPathExpr<'a> {
        let (input, cast) = opt(complex_cast)(input)?;
        let (input, path) = opt(collectionPathExpr)(input)?;
        Ok((input, ComplexColPathExpr { cast, path }))
    }
}

// A qualified name followed by parameters is a function, not a cast.
fn complex_cast(input: Input<'_>) -> PResult<'_, crate::cst::resource::ComplexCast<'_>> {
    terminated(prefixed("/", qualifiedComplexTypeName), not(OPEN))(input)
}

//* collectionPathExpr = count [ OPEN expandCountOption *( SEMI expandCountOption ) CLOSE ]
//*                    / "/" boundFunctionExpr
//*                    / "/" annotationExpr
//*                    / "/" anyExpr
//*                    / "/" allExpr
rule! {
    pub fn collectionPathExpr<'a>(input) -> CollectionPathExpr<'a> {
        alt((
            map(chain(count, option_list(expandCountOption)), CollectionPathExpr::Count),
            map(prefixed("/", boundFunctionExpr), CollectionPathExpr::BoundFunction),
            map(prefixed("/", annotationExpr), CollectionPathExpr::Annotation),
            map(prefixed("/", anyExpr), CollectionPathExpr::Any),
            map(prefixed("/", allExpr), CollectionPathExpr::All),
        ))(input)
    }
}

//* complexPathExpr = [ "/" qualifiedComplexTypeName ]
//*                   [ "/" propertyPathExpr
//*                   / "/" boundFunctionExpr
//*                   / "/" annotationExpr
//*                   ]
//
// Functions go before properties, which would stop at the dot.
rule! {
    pub fn complexPathExpr<'a>(input) -> ComplexPathExpr<'a> {
        let (input, cast) = opt(complex_cast)(input)?;
        let (input, path) = opt(alt((
            map(prefixed("/", boundFunctionExpr), ComplexPathExprTail::BoundFunction),
            map(prefixed("/", annotationExpr), ComplexPathExprTail::Annotation),
            map(prefixed("/", propertyPathExpr), ComplexPathExprTail::PropertyPath),
        )))(input)?;
        Ok((input, ComplexPathExpr { cast, path }))
    }
}

//* primitivePathExpr = "/" [ annotationExpr / boundFunctionExpr ]
rule! {
    pub fn primitivePathExpr<'a>(input) -> PrimitivePathExpr<'a> {
        let (input, slash) = lit("/")(input)?;
        let (input, path) = opt(alt((
            map(annotationExpr, PrimitivePathExprTail::Annotation),
            map(boundFunctionExpr, PrimitivePathExprTail::BoundFunction),
        )))(input)?;
        Ok((input, PrimitivePathExpr { slash, path }))
    }
}

//* boundFunctionExpr = functionExpr ; boundFunction segments can only be composed if the type of the
//*                                  ; previous segment matches the type of the first function parameter
rule! {
    pub fn boundFunctionExpr<'a>(input) -> BoundFunctionExpr<'a> {
        functionExpr(input)
    }
}

//* functionExpr = namespace "."
//*                ( entityColFunction    functionExprParameters [ collectionNavigationExpr ]
//*                / entityFunction       functionExprParameters [ singleNavigationExpr ]
//*                / complexColFunction   functionExprParameters [ complexColPathExpr ]
//*                / complexFunction      functionExprParameters [ complexPathExpr ]
//*                / primitiveColFunction functionExprParameters [ collectionPathExpr ]
//*                / primitiveFunction    functionExprParameters [ primitivePathExpr ]
//*                )
//
// Function kinds are told apart the way properties are in `propertyPathExpr`.
rule! {
    pub recursive fn functionExpr<'a>(input) -> FunctionExpr<'a> {
        let (input, (namespace, dot)) = pair(namespace, lit("."))(input)?;
        let (input, call) = alt((
            map(
                expr_call(entityColFunction, collection_follows, collectionNavigationExpr),
                FunctionExprCall::EntityCol,
            ),
            map(
                expr_call(complexFunction, path_follows, complexPathExpr),
                FunctionExprCall::Complex,
            ),
            map(
                expr_call(primitiveFunction, anything, primitivePathExpr),
                FunctionExprCall::Primitive,
            ),
            map(
                expr_call(entityFunction, anything, singleNavigationExpr),
                FunctionExprCall::Entity,
            ),
            map(
                expr_call(complexColFunction, anything, complexColPathExpr),
                FunctionExprCall::ComplexCol,
            ),
            map(
                expr_call(primitiveColFunction, anything, collectionPathExpr),
                FunctionExprCall::PrimitiveCol,
            ),
        ))(input)?;
        Ok((input, FunctionExpr { namespace, dot, call }))
    }
}

/// `function functionExprParameters [ path ]`, taken only when `guard`
/// accepts what follows the parameters.
fn expr_call<'a, N, P, F, G, H>(
    mut function: F,
    mut guard: G,
    mut path: H,
) -> impl FnMut(Input<'a>) -> PResult<'a, ExprCall<'a, N, P>>
where
    F: Parser<Input<'a>, N, SyntaxError>,
    G: Parser<Input<'a>, (), SyntaxError>,
    H: Parser<Input<'a>, P, SyntaxError>,
{
    move |input: Input<'a>| {
        let (input, function) = function.parse(input)?;
        let (input, parameters) = functionExprParameters(input)?;
        let (input, _) = guard.parse(input)?;
        let (input, path) = opt_some(|input: Input<'a>| path.parse(input))(input)?;
        Ok((
            input,
            ExprCall {
                function,
                parameters,
                path: path.map(Box::new),
            },
        ))
    }
}

//* functionExprParameters = OPEN [ functionExprParameter *( COMMA functionExprParameter ) ] CLOSE
rule! {
    pub fn functionExprParameters<'a>(input) -> FunctionExprParameters<'a> {
        let (input, (open, parameters, close)) =
            tuple((OPEN, opt(list(functionExprParameter, COMMA)), CLOSE))(input)?;
        Ok((input, FunctionExprParameters { open, parameters, close }))
    }
}

//* functionExprParameter  = parameterName EQ ( parameterAlias / parameterValue )
//
// An alias is only taken as a whole argument; `@p add 1` is a value.
rule! {
    pub fn functionExprParameter<'a>(input) -> FunctionExprParameter<'a> {
        let (input, (name, eq, value)) = tuple((
            parameterName,
            EQ,
            alt((
                map(
                    terminated(parameterAlias, peek(alt((COMMA, CLOSE)))),
                    FunctionExprArgument::Alias,
                ),
                map(parameterValue, FunctionExprArgument::Value),
            )),
        ))(input)?;
        Ok((
            input,
            FunctionExprParameter {
                name,
                eq,
                value: Box::new(value),
            },
        ))
    }
}

//* anyExpr = "any" OPEN BWS [ lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr ] BWS CLOSE
rule! {
    pub fn anyExpr<'a>(input) -> AnyExpr<'a> {
        let (input, (keyword, open, before, lambda, after, close)) =
            tuple((lit_ci("any"), OPEN, BWS, opt(lambda), BWS, CLOSE))(input)?;
        Ok((
            input,
            AnyExpr {
                keyword,
                open,
                before,
                lambda,
                after,
                close,
            },
        ))
    }
}

//* allExpr = "all" OPEN BWS   lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr   BWS CLOSE
rule! {
    pub fn allExpr<'a>(input) -> AllExpr<'a> {
        let (input, (keyword, open, before, lambda, after, close)) =
            tuple((lit_ci("all"), OPEN, BWS, lambda, BWS, CLOSE))(input)?;
        Ok((
            input,
            AllExpr {
                keyword,
                open,
                before,
                lambda,
                after,
                close,
            },
        ))
    }
}

fn lambda(input: Input<'_>) -> PResult<'_, Lambda<'_>> {
    let (input, (variable, before_colon, colon, after_colon, predicate)) =
        tuple((lambdaVariableExpr, BWS, COLON, BWS, lambdaPredicateExpr))(input)?;
    Ok((
        input,
        Lambda {
            variable,
            before_colon,
            colon,
            after_colon,
            predicate: Box::new(predicate),
        },
    ))
}

//* lambdaPredicateExpr = boolCommonExpr ; containing at least one lambdaVariableExpr
rule! {
    pub fn lambdaPredicateExpr<'a>(input) -> LambdaPredicateExpr<'a> {
        boolCommonExpr(input)
    }
}

//* methodCallExpr = indexOfMethodCallExpr
//*                / toLowerMethodCallExpr
//*                / toUpperMethodCallExpr
//*                / trimMethodCallExpr
//*                / substringMethodCallExpr
//*                / concatMethodCallExpr
//*                / lengthMethodCallExpr
//*                / yearMethodCallExpr
//*                / monthMethodCallExpr
//*                / dayMethodCallExpr
//*                / hourMethodCallExpr
//*                / minuteMethodCallExpr
//*                / secondMethodCallExpr
//*                / fractionalsecondsMethodCallExpr
//*                / totalsecondsMethodCallExpr
//*                / dateMethodCallExpr
//*                / timeMethodCallExpr
//*                / roundMethodCallExpr
//*                / floorMethodCallExpr
//*                / ceilingMethodCallExpr
//*                / distanceMethodCallExpr
//*                / geoLengthMethodCallExpr
//*                / totalOffsetMinutesMethodCallExpr
//*                / minDateTimeMethodCallExpr
//*                / maxDateTimeMethodCallExpr
//*                / nowMethodCallExpr
//*                / boolMethodCallExpr
rule! {
    pub fn methodCallExpr<'a>(input) -> MethodCallExpr<'a> {
        alt((
            alt((
                map(indexOfMethodCallExpr, MethodCallExpr::IndexOf),
                map(toLowerMethodCallExpr, MethodCallExpr::ToLower),
                map(toUpperMethodCallExpr, MethodCallExpr::ToUpper),
                map(trimMethodCallExpr, MethodCallExpr::Trim),
                map(substringMethodCallExpr, MethodCallExpr::Substring),
                map(concatMethodCallExpr, MethodCallExpr::Concat),
                map(lengthMethodCallExpr, MethodCallExpr::Length),
                map(yearMethodCallExpr, MethodCallExpr::Year),
                map(monthMethodCallExpr, MethodCallExpr::Month),
                map(dayMethodCallExpr, MethodCallExpr::Day),
                map(hourMethodCallExpr, MethodCallExpr::Hour),
                map(minuteMethodCallExpr, MethodCallExpr::Minute),
                map(secondMethodCallExpr, MethodCallExpr::Second),
                map(fractionalsecondsMethodCallExpr, MethodCallExpr::Fractionalseconds),
            )),
            alt((
                map(totalsecondsMethodCallExpr, MethodCallExpr::Totalseconds),
                map(dateMethodCallExpr, MethodCallExpr::Date),
                map(timeMethodCallExpr, MethodCallExpr::Time),
                map(roundMethodCallExpr, MethodCallExpr::Round),
                map(floorMethodCallExpr, MethodCallExpr::Floor),
                map(ceilingMethodCallExpr, MethodCallExpr::Ceiling),
                map(distanceMethodCallExpr, MethodCallExpr::Distance),
                map(geoLengthMethodCallExpr, MethodCallExpr::GeoLength),
                map(totalOffsetMinutesMethodCallExpr, MethodCallExpr::TotalOffsetMinutes),
                map(minDateTimeMethodCallExpr, MethodCallExpr::MinDateTime),
                map(maxDateTimeMethodCallExpr, MethodCallExpr::MaxDateTime),
                map(nowMethodCallExpr, MethodCallExpr::Now),
                map(boolMethodCallExpr, MethodCallExpr::Bool),
            )),
        ))(input)
    }
}

//* boolMethodCallExpr = endsWithMethodCallExpr
//*                    / startsWithMethodCallExpr
//*                    / containsMethodCallExpr
//*                    / intersectsMethodCallExpr
//*                    / hasSubsetMethodCallExpr
//*                    / hasSubsequenceMethodCallExpr
//
// `hassubset(` is not a prefix of `hassubsequence(`, the parenthesis keeps
// the two apart.
rule! {
    pub fn boolMethodCallExpr<'a>(input) -> BoolMethodCallExpr<'a> {
        alt((
            map(endsWithMethodCallExpr, BoolMethodCallExpr::EndsWith),
            map(startsWithMethodCallExpr, BoolMethodCallExpr::StartsWith),
            map(containsMethodCallExpr, BoolMethodCallExpr::Contains),
            map(intersectsMethodCallExpr, BoolMethodCallExpr::Intersects),
            map(hasSubsetMethodCallExpr, BoolMethodCallExpr::HasSubset),
            map(hasSubsequenceMethodCallExpr, BoolMethodCallExpr::HasSubsequence),
        ))(input)
    }
}

macro_rules! method_rules {
    ($( $rule:ident => $shape:ident($name:literal) -> $node:ident ),* $(,)?) => {
        $(
            pub fn $rule(input: Input<'_>) -> PResult<'_, $node<'_>> {
                traced(stringify!($rule), input, $shape($name))
            }
        )*
    };
}

//* concatMethodCallExpr     = "concat"     OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE
//* containsMethodCallExpr   = "contains"   OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE
//* endsWithMethodCallExpr   = "endswith"   OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE
//* indexOfMethodCallExpr    = "indexof"    OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE
//* lengthMethodCallExpr     = "length"     OPEN BWS commonExpr BWS CLOSE
//* startsWithMethodCallExpr = "startswith" OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE
//* toLowerMethodCallExpr    = "tolower"    OPEN BWS commonExpr BWS CLOSE
//* toUpperMethodCallExpr    = "toupper"    OPEN BWS commonExpr BWS CLOSE
//* trimMethodCallExpr       = "trim"       OPEN BWS commonExpr BWS CLOSE
method_rules! {
    concatMethodCallExpr => binary_call("concat") -> ConcatMethodCallExpr,
    containsMethodCallExpr => binary_call("contains") -> ContainsMethodCallExpr,
    endsWithMethodCallExpr => binary_call("endswith") -> EndsWithMethodCallExpr,
    indexOfMethodCallExpr => binary_call("indexof") -> IndexOfMethodCallExpr,
    lengthMethodCallExpr => unary_call("length") -> LengthMethodCallExpr,
    startsWithMethodCallExpr => binary_call("startswith") -> StartsWithMethodCallExpr,
    toLowerMethodCallExpr => unary_call("tolower") -> ToLowerMethodCallExpr,
    toUpperMethodCallExpr => unary_call("toupper") -> ToUpperMethodCallExpr,
    trimMethodCallExpr => unary_call("trim") -> TrimMethodCallExpr,
}

//* substringMethodCallExpr  = "substring"  OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS [ COMMA BWS commonExpr BWS ] CLOSE
rule! {
    pub fn substringMethodCallExpr<'a>(input) -> SubstringMethodCallExpr<'a> {
        let (input, (method, open, first, comma, second)) =
            tuple((lit_ci("substring"), OPEN, padded, COMMA, padded))(input)?;
        let (input, third) = opt(map(pair(COMMA, padded), |(separator, value)| {
            crate::cst::Item { separator, value }
        }))(input)?;
        let (input, close) = CLOSE(input)?;
        Ok((
            input,
            SubstringMethodCallExpr {
                method,
                open,
                first,
                comma,
                second,
                third,
                close,
            },
        ))
    }
}

//* yearMethodCallExpr               = "year"               OPEN BWS commonExpr BWS CLOSE
//* monthMethodCallExpr              = "month"              OPEN BWS commonExpr BWS CLOSE
//* dayMethodCallExpr                = "day"                OPEN BWS commonExpr BWS CLOSE
//* hourMethodCallExpr               = "hour"               OPEN BWS commonExpr BWS CLOSE
//* minuteMethodCallExpr             = "minute"             OPEN BWS commonExpr BWS CLOSE
//* secondMethodCallExpr             = "second"             OPEN BWS commonExpr BWS CLOSE
//* fractionalsecondsMethodCallExpr  = "fractionalseconds"  OPEN BWS commonExpr BWS CLOSE
//* totalsecondsMethodCallExpr       = "totalseconds"       OPEN BWS commonExpr BWS CLOSE
//* dateMethodCallExpr               = "date"               OPEN BWS commonExpr BWS CLOSE
//* timeMethodCallExpr               = "time"               OPEN BWS commonExpr BWS CLOSE
//* totalOffsetMinutesMethodCallExpr = "totaloffsetminutes" OPEN BWS commonExpr BWS CLOSE
//*
//* minDateTimeMethodCallExpr = "mindatetime" OPEN BWS CLOSE
//* maxDateTimeMethodCallExpr = "maxdatetime" OPEN BWS CLOSE
//* nowMethodCallExpr         = "now"         OPEN BWS CLOSE
//*
//* roundMethodCallExpr   = "round"   OPEN BWS commonExpr BWS CLOSE
//* floorMethodCallExpr   = "floor"   OPEN BWS commonExpr BWS CLOSE
//* ceilingMethodCallExpr = "ceiling" OPEN BWS commonExpr BWS CLOSE
//*
//* distanceMethodCallExpr   = "geo.distance"   OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE
//* geoLengthMethodCallExpr  = "geo.length"     OPEN BWS commonExpr BWS CLOSE
//* intersectsMethodCallExpr = "geo.intersects" OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE
//*
//* hasSubsetMethodCallExpr      = "hassubset"      OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE
//* hasSubsequenceMethodCallExpr = "hassubsequence" OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE
method_rules! {
    yearMethodCallExpr => unary_call("year") -> YearMethodCallExpr,
    monthMethodCallExpr => unary_call("month") -> MonthMethodCallExpr,
    dayMethodCallExpr => unary_call("day") -> DayMethodCallExpr,
    hourMethodCallExpr => unary_call("hour") -> HourMethodCallExpr,
    minuteMethodCallExpr => unary_call("minute") -> MinuteMethodCallExpr,
    secondMethodCallExpr => unary_call("second") -> SecondMethodCallExpr,
    fractionalsecondsMethodCallExpr => unary_call("fractionalseconds") -> FractionalsecondsMethodCallExpr,
    totalsecondsMethodCallExpr => unary_call("totalseconds") -> TotalsecondsMethodCallExpr,
    dateMethodCallExpr => unary_call("date") -> DateMethodCallExpr,
    timeMethodCallExpr => unary_call("time") -> TimeMethodCallExpr,
    totalOffsetMinutesMethodCallExpr => unary_call("totaloffsetminutes") -> TotalOffsetMinutesMethodCallExpr,
    minDateTimeMethodCallExpr => nullary_call("mindatetime") -> MinDateTimeMethodCallExpr,
    maxDateTimeMethodCallExpr => nullary_call("maxdatetime") -> MaxDateTimeMethodCallExpr,
    nowMethodCallExpr => nullary_call("now") -> NowMethodCallExpr,
    roundMethodCallExpr => unary_call("round") -> RoundMethodCallExpr,
    floorMethodCallExpr => unary_call("floor") -> FloorMethodCallExpr,
    ceilingMethodCallExpr => unary_call("ceiling") -> CeilingMethodCallExpr,
    distanceMethodCallExpr => binary_call("geo.distance") -> DistanceMethodCallExpr,
    geoLengthMethodCallExpr => unary_call("geo.length") -> GeoLengthMethodCallExpr,
    intersectsMethodCallExpr => binary_call("geo.intersects") -> IntersectsMethodCallExpr,
    hasSubsetMethodCallExpr => binary_call("hassubset") -> HasSubsetMethodCallExpr,
    hasSubsequenceMethodCallExpr => binary_call("hassubsequence") -> HasSubsequenceMethodCallExpr,
}

/// `BWS commonExpr BWS`
fn padded(input: Input<'_>) -> PResult<'_, PaddedExpr<'_>> {
    let (input, (before, expr, after)) = tuple((BWS, commonExpr, BWS))(input)?;
    Ok((
        input,
        PaddedExpr {
            before,
            expr: Box::new(expr),
            after,
        },
    ))
}

fn nullary_call<'a>(name: &'static str) -> impl Fn(Input<'a>) -> PResult<'a, NullaryCall<'a>> {
    move |input: Input<'a>| {
        let (input, (method, open, bws, close)) = tuple((lit_ci(name), OPEN, BWS, CLOSE))(input)?;
        Ok((input, NullaryCall { method, open, bws, close }))
    }
}

fn unary_call<'a>(name: &'static str) -> impl Fn(Input<'a>) -> PResult<'a, UnaryCall<'a>> {
    move |input: Input<'a>| {
        let (input, (method, open, argument, close)) =
            tuple((lit_ci(name), OPEN, padded, CLOSE))(input)?;
        Ok((
            input,
            UnaryCall {
                method,
                open,
                argument,
                close,
            },
        ))
    }
}

fn binary_call<'a>(name: &'static str) -> impl Fn(Input<'a>) -> PResult<'a, BinaryCall<'a>> {
    move |input: Input<'a>| {
        let (input, (method, open, first, comma, second, close)) =
            tuple((lit_ci(name), OPEN, padded, COMMA, padded, CLOSE))(input)?;
        Ok((
            input,
            BinaryCall {
                method,
                open,
                first,
                comma,
                second,
                close,
            },
        ))
    }
}

//* parenExpr = OPEN BWS commonExpr BWS CLOSE
rule! {
    pub fn parenExpr<'a>(input) -> ParenExpr<'a> {
        let (input, (open, expr, close)) = tuple((OPEN, padded, CLOSE))(input)?;
        Ok((input, ParenExpr { open, expr, close }))
    }
}

//* listExpr  = OPEN BWS commonExpr BWS *( COMMA BWS commonExpr BWS ) CLOSE
rule! {
    pub fn listExpr<'a>(input) -> ListExpr<'a> {
        let (input, (open, items, close)) = tuple((OPEN, list(padded, COMMA), CLOSE))(input)?;
        Ok((input, ListExpr { open, items, close }))
    }
}

macro_rules! operator_rules {
    ($( $rule:ident => $operator:literal $right:ident -> $node:ident ),* $(,)?) => {
        $(
            pub fn $rule(input: Input<'_>) -> PResult<'_, $node<'_>> {
                traced(stringify!($rule), input, operator($operator, $right))
            }
        )*
    };
}

/// `RWS operator RWS right`
fn operator<'a, R>(
    name: &'static str,
    right: impl Fn(Input<'a>) -> PResult<'a, R>,
) -> impl Fn(Input<'a>) -> PResult<'a, OperatorExpr<'a, R>> {
    move |input: Input<'a>| {
        let (input, (before, operator, after, right)) = tuple((RWS, lit_ci(name), RWS, &right))(input)?;
        Ok((
            input,
            OperatorExpr {
                before,
                operator,
                after,
                right: Box::new(right),
            },
        ))
    }
}

//* andExpr = RWS "and" RWS boolCommonExpr
//* orExpr  = RWS "or"  RWS boolCommonExpr
//*
//* eqExpr = RWS "eq" RWS commonExpr
//* neExpr = RWS "ne" RWS commonExpr
//* ltExpr = RWS "lt" RWS commonExpr
//* leExpr = RWS "le" RWS commonExpr
//* gtExpr = RWS "gt" RWS commonExpr
//* geExpr = RWS "ge" RWS commonExpr
//* inExpr = RWS "in" RWS commonExpr
//*
//* hasExpr = RWS "has" RWS enum
//*
//* addExpr   = RWS "add"   RWS commonExpr
//* subExpr   = RWS "sub"   RWS commonExpr
//* mulExpr   = RWS "mul"   RWS commonExpr
//* divExpr   = RWS "div"   RWS commonExpr
//* divbyExpr = RWS "divby" RWS commonExpr
//* modExpr   = RWS "mod"   RWS commonExpr
operator_rules! {
    andExpr => "and" boolCommonExpr -> AndExpr,
    orExpr => "or" boolCommonExpr -> OrExpr,
    eqExpr => "eq" commonExpr -> EqExpr,
    neExpr => "ne" commonExpr -> NeExpr,
    ltExpr => "lt" commonExpr -> LtExpr,
    leExpr => "le" commonExpr -> LeExpr,
    gtExpr => "gt" commonExpr -> GtExpr,
    geExpr => "ge" commonExpr -> GeExpr,
    inExpr => "in" commonExpr -> InExpr,
    hasExpr => "has" enum_ -> HasExpr,
    addExpr => "add" commonExpr -> AddExpr,
    subExpr => "sub" commonExpr -> SubExpr,
    mulExpr => "mul" commonExpr -> MulExpr,
    divExpr => "div" commonExpr -> DivExpr,
    divbyExpr => "divby" commonExpr -> DivbyExpr,
    modExpr => "mod" commonExpr -> ModExpr,
}

//* negateExpr = "-" BWS commonExpr
rule! {
    pub fn negateExpr<'a>(input) -> NegateExpr<'a> {
        let (input, (minus, bws, expr)) = tuple((lit("-"), BWS, commonExpr))(input)?;
        Ok((
            input,
            NegateExpr {
                minus,
                bws,
                expr: Box::new(expr),
            },
        ))
    }
}

//* notExpr = "not" RWS boolCommonExpr
rule! {
    pub fn notExpr<'a>(input) -> NotExpr<'a> {
        let (input, (keyword, rws, expr)) = tuple((lit_ci("not"), RWS, boolCommonExpr))(input)?;
        Ok((
            input,
            NotExpr {
                keyword,
                rws,
                expr: Box::new(expr),
            },
        ))
    }
}

//* isofExpr = "isof" OPEN BWS [ commonExpr BWS COMMA BWS ] qualifiedTypeName BWS CLOSE
rule! {
    pub fn isofExpr<'a>(input) -> IsofExpr<'a> {
        type_expr("isof")(input)
    }
}

//* castExpr = "cast" OPEN BWS [ commonExpr BWS COMMA BWS ] qualifiedTypeName BWS CLOSE
rule! {
    pub fn castExpr<'a>(input) -> CastExpr<'a> {
        type_expr("cast")(input)
    }
}

fn type_expr<'a>(name: &'static str) -> impl Fn(Input<'a>) -> PResult<'a, TypeExpr<'a>> {
    move |input: Input<'a>| {
        let (input, (keyword, open, before)) = tuple((lit_ci(name), OPEN, BWS))(input)?;
        let (input, subject) = opt(map(
            tuple((commonExpr, BWS, COMMA, BWS)),
            |(expr, before, comma, after)| TypeExprSubject {
                expr: Box::new(expr),
                before,
                comma,
                after,
            },
        ))(input)?;
        let (input, (type_name, after, close)) = tuple((qualifiedTypeName, BWS, CLOSE))(input)?;
        Ok((
            input,
            TypeExpr {
                keyword,
                open,
                before,
                subject,
                type_name,
                after,
                close,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use nom::Err;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::literal::PrimitiveLiteral;
    use crate::cst::names::PrimitiveProperty;
    use crate::cst::{Chain, Syntax};
    use crate::error::FailureKind;
    use crate::options::ParseOptions;

    fn expr(text: &str) -> CommonExpr<'_> {
        let (rest, expr) = commonExpr(Input::new(text)).unwrap();
        assert!(rest.is_empty(), "unparsed {:?}", rest.as_str());
        assert_eq!(expr.to_source(), text);
        expr
    }

    fn property_name<'a>(expr: &CommonExpr<'a>) -> Option<&'a str> {
        match &expr.operand {
            PrimaryExpr::FirstMember(FirstMemberExpr::Member(MemberExpr {
                type_cast: None,
                member: Member::PropertyPath(PropertyPathExpr::PrimitiveProperty(path)),
            })) => Some(path.head.name()),
            _ => None,
        }
    }

    #[test]
    fn comparison_of_a_property_and_a_string() {
        let expr = expr("id eq 'thisisatest'");
        assert_eq!(property_name(&expr), Some("id"));
        match &expr.comparison {
            Some(ComparisonExpr::Eq(eq)) => {
                assert!(eq.right.is_simple());
                match &eq.right.operand {
                    PrimaryExpr::Literal(PrimitiveLiteral::String(string)) => {
                        assert_eq!(string.to_source(), "'thisisatest'")
                    }
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn operators_need_leading_whitespace() {
        assert!(eqExpr(Input::new("eq")).is_err());
        assert!(eqExpr(Input::new("eq 1")).is_err());
        let (rest, eq) = eqExpr(Input::new(" eq 1")).unwrap();
        assert!(rest.is_empty());
        assert_eq!(eq.operator.text(), "eq");
    }

    #[test]
    fn operator_keywords_ignore_case() {
        let expr = expr("Price GT 5 AND Name Eq null");
        assert!(matches!(expr.comparison, Some(ComparisonExpr::Gt(_))));
    }

    #[test]
    fn operators_nest_to_the_right() {
        let expr = expr("Price add 1 mul 2 eq 7 and Active");
        let add = match &expr.arithmetic {
            Some(ArithmeticExpr::Add(add)) => add,
            other => panic!("unexpected {other:?}"),
        };
        assert!(expr.comparison.is_none());
        assert!(expr.logical.is_none());
        assert!(matches!(add.right.arithmetic, Some(ArithmeticExpr::Mul(_))));
        let mul = add.right.arithmetic.as_ref().unwrap().operator();
        assert!(matches!(mul.right.comparison, Some(ComparisonExpr::Eq(_))));
    }

    #[test]
    fn div_and_divby_are_distinct() {
        assert!(matches!(expr("a div 2").arithmetic, Some(ArithmeticExpr::Div(_))));
        assert!(matches!(expr("a divby 2").arithmetic, Some(ArithmeticExpr::Divby(_))));
    }

    #[test]
    fn contains_call() {
        let (rest, call) = containsMethodCallExpr(Input::new("contains(Name,'A')")).unwrap();
        assert!(rest.is_empty());
        assert_eq!(call.method.text(), "contains");
        assert_eq!(call.open.token().text(), "(");
        assert_eq!(call.comma.token().text(), ",");
        assert_eq!(call.close.token().text(), ")");
        assert_eq!(property_name(&call.first.expr), Some("Name"));
        assert_eq!(call.second.expr.to_source(), "'A'");
    }

    #[test]
    fn method_calls_are_not_keys() {
        let expr = expr("length('abc') gt 2");
        match &expr.operand {
            PrimaryExpr::MethodCall(call) => {
                assert_eq!(call.method().text(), "length");
                assert_eq!(call.arguments().len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        let expr = self::expr("substring(Name, 1, 2) eq 'b'");
        match &expr.operand {
            PrimaryExpr::MethodCall(call) => assert_eq!(call.arguments().len(), 3),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            self::expr("now()").operand,
            PrimaryExpr::MethodCall(MethodCallExpr::Now(_))
        ));
    }

    #[test]
    fn lambda_operators() {
        let expr = expr("Items/any(d:d/Price gt 5)");
        let collection = match &expr.operand {
            PrimaryExpr::FirstMember(FirstMemberExpr::Member(MemberExpr {
                member: Member::PropertyPath(PropertyPathExpr::EntityColNavigation(path)),
                ..
            })) => path.tail.as_ref().unwrap(),
            other => panic!("unexpected {other:?}"),
        };
        match &collection.path {
            Some(CollectionNavigationPath::Collection(CollectionPathExpr::Any(any))) => {
                let lambda = any.value.lambda.as_ref().unwrap();
                assert_eq!(lambda.variable.name(), "d");
                assert!(matches!(lambda.predicate.comparison, Some(ComparisonExpr::Gt(_))));
            }
            other => panic!("unexpected {other:?}"),
        }
        expr_ok("Items/any()");
        expr_ok("Items/all( x : x/Done )");
        expr_ok("Items/Model.Special/any(x:x/Done)");
    }

    fn expr_ok(text: &str) {
        let (rest, expr) = commonExpr(Input::new(text)).unwrap();
        assert!(rest.is_empty(), "unparsed {:?}", rest.as_str());
        assert_eq!(expr.to_source(), text);
    }

    #[test]
    fn counts_keys_and_paths() {
        expr_ok("Items/$count gt 0");
        expr_ok("Items/$count($filter=Price gt 5;$search=blue) gt 0");
        expr_ok("Items(1)/Name eq 'x'");
        expr_ok("Address/City eq 'Berlin'");
        expr_ok("Address/Model.Home/City eq 'Berlin'");
        expr_ok("Model.Manager/Reports/$count eq 2");
    }

    #[test]
    fn functions_and_annotations() {
        let expr = expr("Model.Discount(rate=@r,limit=5)/Amount gt 1");
        match &expr.operand {
            PrimaryExpr::Function(function) => {
                assert_eq!(function.call.name(), "Discount");
                let parameters: Vec<_> = function.call.parameters().iter().collect();
                assert_eq!(parameters.len(), 2);
                assert!(matches!(*parameters[0].value, FunctionExprArgument::Alias(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &self::expr("@Core.Description eq 'x'").operand {
            PrimaryExpr::FirstMember(FirstMemberExpr::Member(MemberExpr {
                member: Member::Annotation(annotation),
                ..
            })) => assert_eq!(annotation.head.term.name(), "Description"),
            other => panic!("unexpected {other:?}"),
        }
        expr_ok("Tags/@UI.Hidden#Short eq true");
    }

    #[test]
    fn variables_and_aliases() {
        assert!(matches!(
            expr("$it/Name eq @name").operand,
            PrimaryExpr::FirstMember(FirstMemberExpr::Inscope(Chain {
                head: InscopeVariableExpr::Implicit(_),
                tail: Some(_),
            }))
        ));
        assert!(matches!(
            expr("@p").operand,
            PrimaryExpr::FirstMember(FirstMemberExpr::Inscope(Chain {
                head: InscopeVariableExpr::Alias(_),
                tail: None,
            }))
        ));
        expr_ok("$root/People('russell')/Name eq Name");
        expr_ok("$root/Me");
    }

    #[test]
    fn lists_parentheses_and_unary_operators() {
        assert!(matches!(
            expr("Name in ('a', 'b')").comparison,
            Some(ComparisonExpr::In(_))
        ));
        assert!(matches!(expr("(1 add 2)").operand, PrimaryExpr::Paren(_)));
        assert!(matches!(expr("not (a eq 1)").operand, PrimaryExpr::Not(_)));
        assert!(matches!(expr("-Price lt 0").operand, PrimaryExpr::Negate(_)));
        assert!(matches!(expr("-5").operand, PrimaryExpr::Literal(_)));
        assert!(matches!(
            expr("Style has Model.Color'Yellow'").comparison,
            Some(ComparisonExpr::Has(_))
        ));
    }

    #[test]
    fn casts_with_and_without_subject() {
        match &expr("cast(Edm.String)").operand {
            PrimaryExpr::Cast(cast) => assert!(cast.subject.is_none()),
            other => panic!("unexpected {other:?}"),
        }
        match &expr("isof(Manager, Model.Employee)").operand {
            PrimaryExpr::Isof(isof) => assert!(isof.subject.is_some()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn property_kinds() {
        match &expr("Name").operand {
            PrimaryExpr::FirstMember(FirstMemberExpr::Member(MemberExpr {
                member: Member::PropertyPath(PropertyPathExpr::PrimitiveProperty(path)),
                ..
            })) => assert!(matches!(path.head, PrimitiveProperty::Key(_))),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nesting_is_bounded() {
        let options = ParseOptions::default().with_max_depth(8);
        let text = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        match commonExpr(Input::with_options(&text, &options)) {
            Err(Err::Failure(error)) => assert_eq!(error.kind, FailureKind::RecursionLimit),
            other => panic!("unexpected {other:?}"),
        }
        let text = format!("{}1{}", "(".repeat(3), ")".repeat(3));
        assert!(commonExpr(Input::with_options(&text, &options)).is_ok());
    }
}
