//! Literal data values (section 7).

use nom::branch::alt;
use nom::combinator::{map, not, opt};
use nom::sequence::{pair, terminated, tuple};

use crate::combinator::{
    class, exactly, keyword, keyword_ci, lexeme, list, list_of, lit, lit_ci, many, range, PResult,
};
use crate::cst::literal::*;
use crate::cst::Token;
use crate::input::Input;

use super::*;

//* ;------------------------------------------------------------------------------
//* ; 7. Literal Data Values
//* ;------------------------------------------------------------------------------
//*
//* ; in URLs
//* primitiveLiteral = nullValue                  ; plain values up to int64Value
//*                  / booleanValue
//*                  / guidValue
//*                  / dateValue
//*                  / dateTimeOffsetValue
//*                  / timeOfDayValue
//*                  / decimalValue
//*                  / doubleValue
//*                  / singleValue
//*                  / sbyteValue
//*                  / byteValue
//*                  / int16Value
//*                  / int32Value
//*                  / int64Value
//*                  / string                     ; single-quoted
//*                  / duration
//*                  / enum
//*                  / binary                     ; all others are quoted and prefixed
//*                  / geographyCollection
//*                  / geographyLineString
//*                  / geographyMultiLineString
//*                  / geographyMultiPoint
//*                  / geographyMultiPolygon
//*                  / geographyPoint
//*                  / geographyPolygon
//*                  / geometryCollection
//*                  / geometryLineString
//*                  / geometryMultiLineString
//*                  / geometryMultiPoint
//*                  / geometryMultiPolygon
//*                  / geometryPoint
//*                  / geometryPolygon
//
// `dateTimeOffsetValue` is tried before its prefix `dateValue`. Every number
// matches `decimalValue`, so the narrower numeric alternatives after it are
// never reported; which of them a number fits is for the consumer to decide.
// Likewise an unprefixed duration or enum in quotes reads as a `string`.
rule! {
    pub fn primitiveLiteral<'a>(input) -> PrimitiveLiteral<'a> {
        alt((
            alt((
                map(nullValue, PrimitiveLiteral::Null),
                map(booleanValue, PrimitiveLiteral::Boolean),
                map(guidValue, PrimitiveLiteral::Guid),
                map(dateTimeOffsetValue, PrimitiveLiteral::DateTimeOffset),
                map(dateValue, PrimitiveLiteral::Date),
                map(timeOfDayValue, PrimitiveLiteral::TimeOfDay),
                map(decimalValue, PrimitiveLiteral::Decimal),
                map(doubleValue, PrimitiveLiteral::Double),
                map(singleValue, PrimitiveLiteral::Single),
                map(sbyteValue, PrimitiveLiteral::SByte),
                map(byteValue, PrimitiveLiteral::Byte),
                map(int16Value, PrimitiveLiteral::Int16),
                map(int32Value, PrimitiveLiteral::Int32),
                map(int64Value, PrimitiveLiteral::Int64),
                map(string, PrimitiveLiteral::String),
                map(duration, PrimitiveLiteral::Duration),
                map(enum_, PrimitiveLiteral::Enum),
                map(binary, PrimitiveLiteral::Binary),
            )),
            alt((
                map(geographyCollection, PrimitiveLiteral::GeographyCollection),
                map(geographyLineString, PrimitiveLiteral::GeographyLineString),
                map(geographyMultiLineString, PrimitiveLiteral::GeographyMultiLineString),
                map(geographyMultiPoint, PrimitiveLiteral::GeographyMultiPoint),
                map(geographyMultiPolygon, PrimitiveLiteral::GeographyMultiPolygon),
                map(geographyPoint, PrimitiveLiteral::GeographyPoint),
                map(geographyPolygon, PrimitiveLiteral::GeographyPolygon),
                map(geometryCollection, PrimitiveLiteral::GeometryCollection),
                map(geometryLineString, PrimitiveLiteral::GeometryLineString),
                map(geometryMultiLineString, PrimitiveLiteral::GeometryMultiLineString),
                map(geometryMultiPoint, PrimitiveLiteral::GeometryMultiPoint),
                map(geometryMultiPolygon, PrimitiveLiteral::GeometryMultiPolygon),
                map(geometryPoint, PrimitiveLiteral::GeometryPoint),
                map(geometryPolygon, PrimitiveLiteral::GeometryPolygon),
            )),
        ))(input)
    }
}

//* ; in Atom and JSON message bodies and CSDL DefaultValue attributes
//* primitiveValue = booleanValue
//*                / guidValue
//*                / durationValue
//*                / dateValue
//*                / dateTimeOffsetValue
//*                / timeOfDayValue
//*                / enumValue
//*                / fullCollectionLiteral
//*                / fullLineStringLiteral
//*                / fullMultiPointLiteral
//*                / fullMultiLineStringLiteral
//*                / fullMultiPolygonLiteral
//*                / fullPointLiteral
//*                / fullPolygonLiteral
//*                / decimalValue
//*                / doubleValue
//*                / singleValue
//*                / sbyteValue
//*                / byteValue
//*                / int16Value
//*                / int32Value
//*                / int64Value
//*                / binaryValue
//*                ; also valid are:
//*                ; - any XML string for strings in Atom and CSDL documents
//*                ; - any JSON string for JSON documents
//
// `enumValue` moves behind the numbers, which it would otherwise read as
// member values. A duration must not run on into a name (`Pink` is an enum
// member, not the duration `P`).
rule! {
    pub fn primitiveValue<'a>(input) -> PrimitiveValue<'a> {
        alt((
            alt((
                map(booleanValue, PrimitiveValue::Boolean),
                map(guidValue, PrimitiveValue::Guid),
                map(terminated(durationValue, not(identifierCharacter)), PrimitiveValue::Duration),
                map(dateTimeOffsetValue, PrimitiveValue::DateTimeOffset),
                map(dateValue, PrimitiveValue::Date),
                map(timeOfDayValue, PrimitiveValue::TimeOfDay),
                map(fullCollectionLiteral, PrimitiveValue::FullCollection),
                map(fullLineStringLiteral, PrimitiveValue::FullLineString),
                map(fullMultiPointLiteral, PrimitiveValue::FullMultiPoint),
                map(fullMultiLineStringLiteral, PrimitiveValue::FullMultiLineString),
                map(fullMultiPolygonLiteral, PrimitiveValue::FullMultiPolygon),
                map(fullPointLiteral, PrimitiveValue::FullPoint),
                map(fullPolygonLiteral, PrimitiveValue::FullPolygon),
            )),
            alt((
                map(decimalValue, PrimitiveValue::Decimal),
                map(doubleValue, PrimitiveValue::Double),
                map(singleValue, PrimitiveValue::Single),
                map(sbyteValue, PrimitiveValue::SByte),
                map(byteValue, PrimitiveValue::Byte),
                map(int16Value, PrimitiveValue::Int16),
                map(int32Value, PrimitiveValue::Int32),
                map(int64Value, PrimitiveValue::Int64),
                map(enumValue, PrimitiveValue::Enum),
                map(binaryValue, PrimitiveValue::Binary),
            )),
        ))(input)
    }
}

//* nullValue = 'null'
rule! {
    pub fn nullValue<'a>(input) -> NullValue<'a> {
        let (input, text) = keyword("null")(input)?;
        Ok((input, NullValue { text }))
    }
}

//* ; base64url encoding according to http://tools.ietf.org/html/rfc4648#section-5
//* binary      = "binary" SQUOTE binaryValue SQUOTE
rule! {
    pub fn binary<'a>(input) -> Binary<'a> {
        let (input, (prefix, open, value, close)) =
            tuple((lit_ci("binary"), SQUOTE, binaryValue, SQUOTE))(input)?;
        Ok((input, Binary { prefix, open, value, close }))
    }
}

//* binaryValue = *(4base64char) [ base64b16  / base64b8 ]
rule! {
    pub fn binaryValue<'a>(input) -> BinaryValue<'a> {
        let (input, text) = lexeme(pair(
            many(exactly(4, base64char)),
            opt(alt((base64b16, base64b8))),
        ))(input)?;
        Ok((input, BinaryValue { text }))
    }
}

//* base64b16   = 2base64char ( 'A' / 'E' / 'I' / 'M' / 'Q' / 'U' / 'Y' / 'c' / 'g' / 'k' / 'o' / 's' / 'w' / '0' / '4' / '8' )   [ "=" ]
pub fn base64b16(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(tuple((
        exactly(2, base64char),
        class(|c| "AEIMQUYcgkosw048".contains(c)),
        opt(lit("=")),
    )))(input)
}

//* base64b8    = base64char ( 'A' / 'Q' / 'g' / 'w' ) [ "==" ]
pub fn base64b8(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(tuple((
        base64char,
        class(|c| matches!(c, 'A' | 'Q' | 'g' | 'w')),
        opt(lit("==")),
    )))(input)
}

//* base64char  = ALPHA / DIGIT / "-" / "_"
pub fn base64char(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)
}

//* booleanValue = "true" / "false"
rule! {
    pub fn booleanValue<'a>(input) -> BooleanValue<'a> {
        let (input, text) = alt((keyword_ci("true"), keyword_ci("false")))(input)?;
        Ok((input, BooleanValue { text }))
    }
}

//* decimalValue = [ SIGN ] 1*DIGIT [ "." 1*DIGIT ] [ "e" [ SIGN ] 1*DIGIT ] / nanInfinity
rule! {
    pub fn decimalValue<'a>(input) -> DecimalValue<'a> {
        let (input, text) = decimal(input)?;
        Ok((input, DecimalValue { text }))
    }
}

fn decimal(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        lexeme(tuple((
            opt(SIGN),
            digits(1, None),
            opt(pair(lit("."), digits(1, None))),
            opt(tuple((lit_ci("e"), opt(SIGN), digits(1, None)))),
        ))),
        nanInfinity,
    ))(input)
}

//* doubleValue  = decimalValue ; IEEE 754 binary64 floating-point number (15-17 decimal digits)
rule! {
    pub fn doubleValue<'a>(input) -> DoubleValue<'a> {
        let (input, text) = decimal(input)?;
        Ok((input, DoubleValue { text }))
    }
}

//* singleValue  = decimalValue ; IEEE 754 binary32 floating-point number (6-9 decimal digits)
rule! {
    pub fn singleValue<'a>(input) -> SingleValue<'a> {
        let (input, text) = decimal(input)?;
        Ok((input, SingleValue { text }))
    }
}

//* nanInfinity  = 'NaN' / '-INF' / 'INF'
pub fn nanInfinity(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((keyword("NaN"), keyword("-INF"), keyword("INF")))(input)
}

//* guidValue = 8HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 12HEXDIG
rule! {
    pub fn guidValue<'a>(input) -> GuidValue<'a> {
        let (input, text) = lexeme(tuple((
            exactly(8, HEXDIG),
            lit("-"),
            exactly(4, HEXDIG),
            lit("-"),
            exactly(4, HEXDIG),
            lit("-"),
            exactly(4, HEXDIG),
            lit("-"),
            exactly(12, HEXDIG),
        )))(input)?;
        Ok((input, GuidValue { text }))
    }
}

fn signed<'a>(max: usize) -> impl FnMut(Input<'a>) -> PResult<'a, Token<'a>> {
    lexeme(pair(opt(SIGN), digits(1, Some(max))))
}

//* byteValue  = 1*3DIGIT           ; numbers in the range from 0 to 255
rule! {
    pub fn byteValue<'a>(input) -> ByteValue<'a> {
        let (input, text) = digits(1, Some(3))(input)?;
        Ok((input, ByteValue { text }))
    }
}

//* sbyteValue = [ SIGN ] 1*3DIGIT  ; numbers in the range from -128 to 127
rule! {
    pub fn sbyteValue<'a>(input) -> SbyteValue<'a> {
        let (input, text) = signed(3)(input)?;
        Ok((input, SbyteValue { text }))
    }
}

//* int16Value = [ SIGN ] 1*5DIGIT  ; numbers in the range from -32768 to 32767
rule! {
    pub fn int16Value<'a>(input) -> Int16Value<'a> {
        let (input, text) = signed(5)(input)?;
        Ok((input, Int16Value { text }))
    }
}

//* int32Value = [ SIGN ] 1*10DIGIT ; numbers in the range from -2147483648 to 2147483647
rule! {
    pub fn int32Value<'a>(input) -> Int32Value<'a> {
        let (input, text) = signed(10)(input)?;
        Ok((input, Int32Value { text }))
    }
}

//* int64Value = [ SIGN ] 1*19DIGIT ; numbers in the range from -9223372036854775808 to 9223372036854775807
rule! {
    pub fn int64Value<'a>(input) -> Int64Value<'a> {
        let (input, text) = signed(19)(input)?;
        Ok((input, Int64Value { text }))
    }
}

//* string           = SQUOTE *( SQUOTE-in-string / pchar-no-SQUOTE ) SQUOTE
rule! {
    pub fn string<'a>(input) -> OdataString<'a> {
        let (input, open) = SQUOTE(input)?;
        let (input, content) = lexeme(many(alt((SQUOTE_in_string, pchar_no_SQUOTE))))(input)?;
        let (input, close) = SQUOTE(input)?;
        Ok((input, OdataString { open, content, close }))
    }
}

//* SQUOTE-in-string = SQUOTE SQUOTE ; two consecutive single quotes represent one within a string literal
pub fn SQUOTE_in_string(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(pair(SQUOTE, SQUOTE))(input)
}

//* dateValue = year "-" month "-" day
rule! {
    pub fn dateValue<'a>(input) -> DateValue<'a> {
        let (input, (year, first_dash, month, second_dash, day)) =
            tuple((year, lit("-"), month, lit("-"), day))(input)?;
        Ok((
            input,
            DateValue {
                year,
                first_dash,
                month,
                second_dash,
                day,
            },
        ))
    }
}

//* dateTimeOffsetValue = year "-" month "-" day "T" hour ":" minute [ ":" second [ "." fractionalSeconds ] ] ( "Z" / SIGN hour ":" minute )
rule! {
    pub fn dateTimeOffsetValue<'a>(input) -> DateTimeOffsetValue<'a> {
        let (input, (date, separator, time)) =
            tuple((dateValue, lit_ci("T"), timeOfDayValue))(input)?;
        let (input, zone) = alt((
            map(lit_ci("Z"), TimeZone::Utc),
            map(
                tuple((SIGN, hour, lit(":"), minute)),
                |(sign, hour, colon, minute)| {
                    TimeZone::Offset(ZoneOffset {
                        sign,
                        hour,
                        colon,
                        minute,
                    })
                },
            ),
        ))(input)?;
        Ok((
            input,
            DateTimeOffsetValue {
                date,
                separator,
                time,
                zone,
            },
        ))
    }
}

//* duration      = [ "duration" ] SQUOTE durationValue SQUOTE
rule! {
    pub fn duration<'a>(input) -> Duration<'a> {
        let (input, (prefix, open, value, close)) =
            tuple((opt(lit_ci("duration")), SQUOTE, durationValue, SQUOTE))(input)?;
        Ok((input, Duration { prefix, open, value, close }))
    }
}

//* durationValue = [ SIGN ] "P" [ 1*DIGIT "D" ] [ "T" [ 1*DIGIT "H" ] [ 1*DIGIT "M" ] [ 1*DIGIT [ "." 1*DIGIT ] "S" ] ]
//*      ; the above is an approximation of the rules for an xml dayTimeDuration.
//*      ; see the lexical representation for dayTimeDuration in http://www.w3.org/TR/xmlschema11-2#dayTimeDuration for more information
rule! {
    pub fn durationValue<'a>(input) -> DurationValue<'a> {
        let (input, text) = lexeme(tuple((
            opt(SIGN),
            lit_ci("P"),
            opt(pair(digits(1, None), lit_ci("D"))),
            opt(tuple((
                lit_ci("T"),
                opt(pair(digits(1, None), lit_ci("H"))),
                opt(pair(digits(1, None), lit_ci("M"))),
                opt(tuple((
                    digits(1, None),
                    opt(pair(lit("."), digits(1, None))),
                    lit_ci("S"),
                ))),
            ))),
        )))(input)?;
        Ok((input, DurationValue { text }))
    }
}

//* timeOfDayValue = hour ":" minute [ ":" second [ "." fractionalSeconds ] ]
rule! {
    pub fn timeOfDayValue<'a>(input) -> TimeOfDayValue<'a> {
        let (input, (hour, colon, minute)) = tuple((hour, lit(":"), minute))(input)?;
        let (input, seconds) = opt(map(
            tuple((
                lit(":"),
                second,
                opt(map(pair(lit("."), fractionalSeconds), |(dot, digits)| {
                    FractionalSeconds { dot, digits }
                })),
            )),
            |(colon, second, fraction)| Seconds {
                colon,
                second,
                fraction,
            },
        ))(input)?;
        Ok((
            input,
            TimeOfDayValue {
                hour,
                colon,
                minute,
                seconds,
            },
        ))
    }
}

//* oneToNine       = "1" / "2" / "3" / "4" / "5" / "6" / "7" / "8" / "9"
//* zeroToFiftyNine = ( "0" / "1" / "2" / "3" / "4" / "5" ) DIGIT
pub fn zeroToFiftyNine(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(pair(range('0', '5'), DIGIT))(input)
}

//* year  = [ "-" ] ( "0" 3DIGIT / oneToNine 3*DIGIT )
pub fn year(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(pair(
        opt(lit("-")),
        alt((
            lexeme(pair(lit("0"), digits(3, Some(3)))),
            lexeme(pair(oneToNine, digits(3, None))),
        )),
    ))(input)
}

//* month = "0" oneToNine
//*       / "1" ( "0" / "1" / "2" )
pub fn month(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(alt((
        pair(lit("0"), oneToNine),
        pair(lit("1"), range('0', '2')),
    )))(input)
}

//* day   = "0" oneToNine
//*       / ( "1" / "2" ) DIGIT
//*       / "3" ( "0" / "1" )
pub fn day(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(alt((
        pair(lit("0"), oneToNine),
        pair(range('1', '2'), DIGIT),
        pair(lit("3"), range('0', '1')),
    )))(input)
}

//* hour   = ( "0" / "1" ) DIGIT
//*        / "2" ( "0" / "1" / "2" / "3" )
pub fn hour(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(alt((
        pair(range('0', '1'), DIGIT),
        pair(lit("2"), range('0', '3')),
    )))(input)
}

//* minute = zeroToFiftyNine
pub fn minute(input: Input<'_>) -> PResult<'_, Token<'_>> {
    zeroToFiftyNine(input)
}

//* second = zeroToFiftyNine
pub fn second(input: Input<'_>) -> PResult<'_, Token<'_>> {
    zeroToFiftyNine(input)
}

//* fractionalSeconds = 1*12DIGIT
pub fn fractionalSeconds(input: Input<'_>) -> PResult<'_, Token<'_>> {
    digits(1, Some(12))(input)
}

//* enum            = [ qualifiedEnumTypeName ] SQUOTE enumValue SQUOTE
rule! {
    pub fn enum_<'a>(input) -> Enum<'a> {
        let (input, (type_name, open, value, close)) =
            tuple((opt(qualifiedEnumTypeName), SQUOTE, enumValue, SQUOTE))(input)?;
        Ok((
            input,
            Enum {
                type_name,
                open,
                value,
                close,
            },
        ))
    }
}

//* enumValue       = singleEnumValue *( COMMA singleEnumValue )
rule! {
    pub fn enumValue<'a>(input) -> EnumValue<'a> {
        let (input, members) = list(singleEnumValue, COMMA)(input)?;
        Ok((input, EnumValue { members }))
    }
}

//* singleEnumValue = enumerationMember / enumMemberValue
rule! {
    pub fn singleEnumValue<'a>(input) -> SingleEnumValue<'a> {
        alt((
            map(enumerationMember, SingleEnumValue::Member),
            map(enumMemberValue, SingleEnumValue::Value),
        ))(input)
    }
}

//* enumMemberValue = int64Value
pub fn enumMemberValue(input: Input<'_>) -> PResult<'_, EnumMemberValue<'_>> {
    int64Value(input)
}

/// `<prefix> SQUOTE <full literal> SQUOTE`
fn spatial<'a, T>(
    prefix: fn(Input<'a>) -> PResult<'a, Token<'a>>,
    value: impl Fn(Input<'a>) -> PResult<'a, T>,
) -> impl Fn(Input<'a>) -> PResult<'a, SpatialLiteral<'a, T>> {
    move |input: Input<'a>| {
        let (input, (prefix, open, value, close)) = tuple((prefix, SQUOTE, &value, SQUOTE))(input)?;
        Ok((
            input,
            SpatialLiteral {
                prefix,
                open,
                value,
                close,
            },
        ))
    }
}

/// `sridLiteral <literal>`
fn full<'a, T>(
    literal: impl Fn(Input<'a>) -> PResult<'a, T>,
) -> impl Fn(Input<'a>) -> PResult<'a, FullLiteral<'a, T>> {
    move |input: Input<'a>| {
        let (input, (srid, literal)) = pair(sridLiteral, &literal)(input)?;
        Ok((input, FullLiteral { srid, literal }))
    }
}

//* geographyCollection   = geographyPrefix SQUOTE fullCollectionLiteral SQUOTE
rule! {
    pub fn geographyCollection<'a>(input) -> GeographyCollection<'a> {
        spatial(geographyPrefix, fullCollectionLiteral)(input)
    }
}

//* fullCollectionLiteral = sridLiteral collectionLiteral
rule! {
    pub fn fullCollectionLiteral<'a>(input) -> FullCollectionLiteral<'a> {
        full(collectionLiteral)(input)
    }
}

//* collectionLiteral     = "Collection(" geoLiteral *( COMMA geoLiteral ) CLOSE
rule! {
    pub recursive fn collectionLiteral<'a>(input) -> CollectionLiteral<'a> {
        let (input, (keyword, items, close)) =
            tuple((lit_ci("Collection("), list(geoLiteral, COMMA), CLOSE))(input)?;
        Ok((input, CollectionLiteral { keyword, items, close }))
    }
}

//* geoLiteral            = collectionLiteral
//*                       / lineStringLiteral
//*                       / multiPointLiteral
//*                       / multiLineStringLiteral
//*                       / multiPolygonLiteral
//*                       / pointLiteral
//*                       / polygonLiteral
rule! {
    pub fn geoLiteral<'a>(input) -> GeoLiteral<'a> {
        alt((
            map(collectionLiteral, |collection| GeoLiteral::Collection(Box::new(collection))),
            map(lineStringLiteral, GeoLiteral::LineString),
            map(multiPointLiteral, GeoLiteral::MultiPoint),
            map(multiLineStringLiteral, GeoLiteral::MultiLineString),
            map(multiPolygonLiteral, GeoLiteral::MultiPolygon),
            map(pointLiteral, GeoLiteral::Point),
            map(polygonLiteral, GeoLiteral::Polygon),
        ))(input)
    }
}

//* geographyLineString   = geographyPrefix SQUOTE fullLineStringLiteral SQUOTE
rule! {
    pub fn geographyLineString<'a>(input) -> GeographyLineString<'a> {
        spatial(geographyPrefix, fullLineStringLiteral)(input)
    }
}

//* fullLineStringLiteral = sridLiteral lineStringLiteral
rule! {
    pub fn fullLineStringLiteral<'a>(input) -> FullLineStringLiteral<'a> {
        full(lineStringLiteral)(input)
    }
}

//* lineStringLiteral     = "LineString" lineStringData
rule! {
    pub fn lineStringLiteral<'a>(input) -> LineStringLiteral<'a> {
        let (input, (keyword, data)) = pair(lit_ci("LineString"), lineStringData)(input)?;
        Ok((input, LineStringLiteral { keyword, data }))
    }
}

//* lineStringData        = OPEN positionLiteral 1*( COMMA positionLiteral ) CLOSE
rule! {
    pub fn lineStringData<'a>(input) -> LineStringData<'a> {
        let (input, (open, positions, close)) =
            tuple((OPEN, list_of(1, positionLiteral, COMMA), CLOSE))(input)?;
        Ok((input, LineStringData { open, positions, close }))
    }
}

//* geographyMultiLineString   = geographyPrefix SQUOTE fullMultiLineStringLiteral SQUOTE
rule! {
    pub fn geographyMultiLineString<'a>(input) -> GeographyMultiLineString<'a> {
        spatial(geographyPrefix, fullMultiLineStringLiteral)(input)
    }
}

//* fullMultiLineStringLiteral = sridLiteral multiLineStringLiteral
rule! {
    pub fn fullMultiLineStringLiteral<'a>(input) -> FullMultiLineStringLiteral<'a> {
        full(multiLineStringLiteral)(input)
    }
}

//* multiLineStringLiteral     = "MultiLineString(" [ lineStringData *( COMMA lineStringData ) ] CLOSE
rule! {
    pub fn multiLineStringLiteral<'a>(input) -> MultiLineStringLiteral<'a> {
        let (input, (keyword, items, close)) = tuple((
            lit_ci("MultiLineString("),
            opt(list(lineStringData, COMMA)),
            CLOSE,
        ))(input)?;
        Ok((input, MultiLineStringLiteral { keyword, items, close }))
    }
}

//* geographyMultiPoint   = geographyPrefix SQUOTE fullMultiPointLiteral SQUOTE
rule! {
    pub fn geographyMultiPoint<'a>(input) -> GeographyMultiPoint<'a> {
        spatial(geographyPrefix, fullMultiPointLiteral)(input)
    }
}

//* fullMultiPointLiteral = sridLiteral multiPointLiteral
rule! {
    pub fn fullMultiPointLiteral<'a>(input) -> FullMultiPointLiteral<'a> {
        full(multiPointLiteral)(input)
    }
}

//* multiPointLiteral     = "MultiPoint(" [ pointData *( COMMA pointData ) ] CLOSE
rule! {
    pub fn multiPointLiteral<'a>(input) -> MultiPointLiteral<'a> {
        let (input, (keyword, items, close)) =
            tuple((lit_ci("MultiPoint("), opt(list(pointData, COMMA)), CLOSE))(input)?;
        Ok((input, MultiPointLiteral { keyword, items, close }))
    }
}

//* geographyMultiPolygon   = geographyPrefix SQUOTE fullMultiPolygonLiteral SQUOTE
rule! {
    pub fn geographyMultiPolygon<'a>(input) -> GeographyMultiPolygon<'a> {
        spatial(geographyPrefix, fullMultiPolygonLiteral)(input)
    }
}

//* fullMultiPolygonLiteral = sridLiteral multiPolygonLiteral
rule! {
    pub fn fullMultiPolygonLiteral<'a>(input) -> FullMultiPolygonLiteral<'a> {
        full(multiPolygonLiteral)(input)
    }
}

//* multiPolygonLiteral     = "MultiPolygon(" [ polygonData *( COMMA polygonData ) ] CLOSE
rule! {
    pub fn multiPolygonLiteral<'a>(input) -> MultiPolygonLiteral<'a> {
        let (input, (keyword, items, close)) =
            tuple((lit_ci("MultiPolygon("), opt(list(polygonData, COMMA)), CLOSE))(input)?;
        Ok((input, MultiPolygonLiteral { keyword, items, close }))
    }
}

//* geographyPoint   = geographyPrefix SQUOTE fullPointLiteral SQUOTE
rule! {
    pub fn geographyPoint<'a>(input) -> GeographyPoint<'a> {
        spatial(geographyPrefix, fullPointLiteral)(input)
    }
}

//* fullPointLiteral = sridLiteral pointLiteral
rule! {
    pub fn fullPointLiteral<'a>(input) -> FullPointLiteral<'a> {
        full(pointLiteral)(input)
    }
}

//* sridLiteral      = "SRID" EQ 1*5DIGIT SEMI
rule! {
    pub fn sridLiteral<'a>(input) -> SridLiteral<'a> {
        let (input, (keyword, eq, srid, semi)) =
            tuple((lit_ci("SRID"), EQ, digits(1, Some(5)), SEMI))(input)?;
        Ok((input, SridLiteral { keyword, eq, srid, semi }))
    }
}

//* pointLiteral     ="Point" pointData
rule! {
    pub fn pointLiteral<'a>(input) -> PointLiteral<'a> {
        let (input, (keyword, data)) = pair(lit_ci("Point"), pointData)(input)?;
        Ok((input, PointLiteral { keyword, data }))
    }
}

//* pointData        = OPEN positionLiteral CLOSE
rule! {
    pub fn pointData<'a>(input) -> PointData<'a> {
        let (input, (open, position, close)) = tuple((OPEN, positionLiteral, CLOSE))(input)?;
        Ok((input, PointData { open, position, close }))
    }
}

//* positionLiteral  = doubleValue SP doubleValue  ; longitude, then latitude
rule! {
    pub fn positionLiteral<'a>(input) -> PositionLiteral<'a> {
        let (input, (longitude, space, latitude)) =
            tuple((doubleValue, SP, doubleValue))(input)?;
        Ok((
            input,
            PositionLiteral {
                longitude,
                space,
                latitude,
            },
        ))
    }
}

//* geographyPolygon   = geographyPrefix SQUOTE fullPolygonLiteral SQUOTE
rule! {
    pub fn geographyPolygon<'a>(input) -> GeographyPolygon<'a> {
        spatial(geographyPrefix, fullPolygonLiteral)(input)
    }
}

//* fullPolygonLiteral = sridLiteral polygonLiteral
rule! {
    pub fn fullPolygonLiteral<'a>(input) -> FullPolygonLiteral<'a> {
        full(polygonLiteral)(input)
    }
}

//* polygonLiteral     = "Polygon" polygonData
rule! {
    pub fn polygonLiteral<'a>(input) -> PolygonLiteral<'a> {
        let (input, (keyword, data)) = pair(lit_ci("Polygon"), polygonData)(input)?;
        Ok((input, PolygonLiteral { keyword, data }))
    }
}

//* polygonData        = OPEN ringLiteral *( COMMA ringLiteral ) CLOSE
rule! {
    pub fn polygonData<'a>(input) -> PolygonData<'a> {
        let (input, (open, rings, close)) = tuple((OPEN, list(ringLiteral, COMMA), CLOSE))(input)?;
        Ok((input, PolygonData { open, rings, close }))
    }
}

//* ringLiteral        = OPEN positionLiteral *( COMMA positionLiteral ) CLOSE
//*                    ; Within each ringLiteral, the first and last positionLiteral elements MUST be an exact syntactic match to each other.
//*                    ; Within the polygonData, the ringLiterals MUST specify their points in appropriate winding order.
//*                    ; In order of traversal, points to the left side of the ring are interpreted as being in the polygon.
rule! {
    pub fn ringLiteral<'a>(input) -> RingLiteral<'a> {
        let (input, (open, positions, close)) =
            tuple((OPEN, list(positionLiteral, COMMA), CLOSE))(input)?;
        Ok((input, RingLiteral { open, positions, close }))
    }
}

//* geometryCollection      = geometryPrefix SQUOTE fullCollectionLiteral      SQUOTE
rule! {
    pub fn geometryCollection<'a>(input) -> GeometryCollection<'a> {
        spatial(geometryPrefix, fullCollectionLiteral)(input)
    }
}

//* geometryLineString      = geometryPrefix SQUOTE fullLineStringLiteral      SQUOTE
rule! {
    pub fn geometryLineString<'a>(input) -> GeometryLineString<'a> {
        spatial(geometryPrefix, fullLineStringLiteral)(input)
    }
}

//* geometryMultiLineString = geometryPrefix SQUOTE fullMultiLineStringLiteral SQUOTE
rule! {
    pub fn geometryMultiLineString<'a>(input) -> GeometryMultiLineString<'a> {
        spatial(geometryPrefix, fullMultiLineStringLiteral)(input)
    }
}

//* geometryMultiPoint      = geometryPrefix SQUOTE fullMultiPointLiteral      SQUOTE
rule! {
    pub fn geometryMultiPoint<'a>(input) -> GeometryMultiPoint<'a> {
        spatial(geometryPrefix, fullMultiPointLiteral)(input)
    }
}

//* geometryMultiPolygon    = geometryPrefix SQUOTE fullMultiPolygonLiteral    SQUOTE
rule! {
    pub fn geometryMultiPolygon<'a>(input) -> GeometryMultiPolygon<'a> {
        spatial(geometryPrefix, fullMultiPolygonLiteral)(input)
    }
}

//* geometryPoint           = geometryPrefix SQUOTE fullPointLiteral           SQUOTE
rule! {
    pub fn geometryPoint<'a>(input) -> GeometryPoint<'a> {
        spatial(geometryPrefix, fullPointLiteral)(input)
    }
}

//* geometryPolygon         = geometryPrefix SQUOTE fullPolygonLiteral         SQUOTE
rule! {
    pub fn geometryPolygon<'a>(input) -> GeometryPolygon<'a> {
        spatial(geometryPrefix, fullPolygonLiteral)(input)
    }
}

//* geographyPrefix = "geography"
pub fn geographyPrefix(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lit_ci("geography")(input)
}

//* geometryPrefix  = "geometry"
pub fn geometryPrefix(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lit_ci("geometry")(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::Syntax;

    fn full_match<'a, O>(
        parser: impl FnOnce(Input<'a>) -> PResult<'a, O>,
        text: &'a str,
    ) -> O {
        let (rest, value) = parser(Input::new(text)).unwrap();
        assert!(rest.is_empty(), "left {:?}", rest.as_str());
        value
    }

    #[test]
    fn guid_has_five_groups() {
        let guid = full_match(guidValue, "12345678-1234-1234-1234-123456789012");
        assert_eq!(guid.as_str().split('-').map(str::len).collect::<Vec<_>>(), vec![8, 4, 4, 4, 12]);
        assert_eq!(
            guid.to_uuid().unwrap().to_string(),
            "12345678-1234-1234-1234-123456789012"
        );

        assert!(guidValue(Input::new("12345678-1234-1234-1234-12345678901")).is_err());
    }

    #[test]
    fn string_collapses_doubled_quotes() {
        let string = full_match(string, "'it''s'");
        assert_eq!(string.content.text(), "it''s");
        assert_eq!(string.value(), "it's");

        assert_eq!(full_match(super::string, "''").value(), "");
        assert_eq!(full_match(super::string, "%27a%27%27b%27").value(), "a'b");
        assert!(super::string(Input::new("'open")).is_err());
    }

    #[test]
    fn numbers_read_as_decimals_in_urls() {
        let literal = full_match(primitiveLiteral, "-12.5e3");
        match literal {
            PrimitiveLiteral::Decimal(decimal) => assert_eq!(decimal.to_f64(), Some(-12500.0)),
            other => panic!("unexpected {other:?}"),
        }

        match full_match(primitiveLiteral, "INF") {
            PrimitiveLiteral::Decimal(decimal) => assert_eq!(decimal.to_f64(), Some(f64::INFINITY)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn integer_values_check_their_range() {
        assert_eq!(full_match(byteValue, "255").value(), Some(255));
        assert_eq!(full_match(byteValue, "256").value(), None);
        assert_eq!(full_match(sbyteValue, "-128").value(), Some(-128));
        assert_eq!(full_match(int16Value, "%2B123").value(), Some(123));
        assert_eq!(full_match(int64Value, "-9223372036854775808").value(), Some(i64::MIN));

        let (rest, _) = byteValue(Input::new("1234")).unwrap();
        assert_eq!(rest.as_str(), "4");
    }

    #[test]
    fn keywords_need_a_boundary() {
        assert!(matches!(full_match(primitiveLiteral, "null"), PrimitiveLiteral::Null(_)));
        assert!(nullValue(Input::new("nullable")).is_err());
        assert!(full_match(booleanValue, "TRUE").value());
        assert!(!full_match(booleanValue, "false").value());
    }

    #[test]
    fn date_time_offset_is_not_cut_at_the_date() {
        let literal = full_match(primitiveLiteral, "2012-12-03T07:16:23.5-05:30");
        match literal {
            PrimitiveLiteral::DateTimeOffset(value) => {
                assert_eq!(value.date.year(), Some(2012));
                assert_eq!(value.date.month(), Some(12));
                assert_eq!(value.time.hms(), Some((7, 16, 23)));
                match value.zone {
                    TimeZone::Offset(offset) => assert_eq!(offset.minutes(), Some(-330)),
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(full_match(primitiveLiteral, "2012-12-03"), PrimitiveLiteral::Date(_)));
        assert!(dateValue(Input::new("2012-13-03")).is_err());
        assert!(dateValue(Input::new("2012-12-32")).is_err());
    }

    #[test]
    fn duration_and_enum_literals() {
        let duration = full_match(duration, "duration'P12DT23H59M59.999999999999S'");
        assert_eq!(duration.value.as_str(), "P12DT23H59M59.999999999999S");

        let literal = full_match(primitiveLiteral, "Sales.Pattern'Yellow,Red'");
        match literal {
            PrimitiveLiteral::Enum(value) => {
                assert_eq!(value.type_name.map(|name| name.name.name()), Some("Pattern"));
                assert_eq!(value.value.iter().count(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn primitive_value_keeps_names_whole() {
        assert!(matches!(full_match(primitiveValue, "Pink"), PrimitiveValue::Enum(_)));
        assert!(matches!(full_match(primitiveValue, "P1D"), PrimitiveValue::Duration(_)));
        assert!(matches!(full_match(primitiveValue, "42"), PrimitiveValue::Decimal(_)));
    }

    #[test]
    fn binary_padding() {
        assert_eq!(full_match(binary, "binary'T0RhdGE'").value.as_str(), "T0RhdGE");
        assert_eq!(full_match(binaryValue, "AAAAAA==").as_str(), "AAAAAA==");
        assert_eq!(full_match(binaryValue, "AAA=").as_str(), "AAA=");
    }

    #[test]
    fn geo_literals() {
        let point = full_match(primitiveLiteral, "geography'SRID=0;Point(142.1 64.1)'");
        match &point {
            PrimitiveLiteral::GeographyPoint(point) => {
                assert_eq!(point.value.srid.value(), Some(0));
                assert_eq!(point.value.literal.data.position.latitude.to_f64(), Some(64.1));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(point.to_source(), "geography'SRID=0;Point(142.1 64.1)'");

        let collection = full_match(
            geometryCollection,
            "geometry'SRID=0;Collection(LineString(1 2,3 4),Collection(Point(1 2)))'",
        );
        assert_eq!(collection.value.literal.items.len(), 2);

        assert!(lineStringData(Input::new("(1 2)")).is_err());
        assert!(full_match(multiPointLiteral, "MultiPoint()").items.is_none());
    }
}
