macro_rules! nutype_string {
    ($(#[doc = $doc:literal])* $vis:vis $ident:ident $(($($args:tt)*))?) => {
        $(#[doc = $doc])*
        #[::nutype::nutype(
            $($($args)*,)?
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Hash,
                Deref,
                TryFrom,
                FromStr,
                Display,
                Serialize,
                Deserialize,
            )
        )]
        $vis struct $ident(String);
    };
}

pub(crate) use nutype_string;
