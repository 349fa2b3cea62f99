/// Expands one match arm per column variant, binding `data` and `nulls`.
macro_rules! match_column_variants {
    ($col:expr, $data:ident, $nulls:ident, $body:expr; $($variant:ident),+ $(,)?) => {
        match $col {
            $(Column::$variant {
                data: $data,
                nulls: $nulls,
            } => $body,)+
        }
    };
}

macro_rules! for_each_variant {
    ($col:expr, | $data:ident, $nulls:ident | $body:expr) => {
        match_column_variants!(
            $col, $data, $nulls, $body;
            Bool, Int64, Float64, Numeric, String, Bytes, Date, Time, DateTime, Timestamp,
        )
    };
    ($col:expr, | $data:ident | $body:expr) => {
        for_each_variant!($col, |$data, _nulls| $body)
    };
}

macro_rules! with_nulls {
    ($col:expr, | $nulls:ident | $body:expr) => {
        for_each_variant!($col, |_data, $nulls| $body)
    };
}
