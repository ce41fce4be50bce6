macro_rules! deref {
    ($name:ident::$field:tt => $target:ty) => (itemize! {
        impl ::std::ops::Deref for $name {
            type Target = $target;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.$field
            }
        }
    });
}

macro_rules! itemize(($($blob:item)*) => ($($blob)*));

macro_rules! getter {
    (ref $name:ident: $kind:ty) => (
        #[inline(always)]
        pub fn $name(&self) -> &$kind {
            &self.$name
        }
    );
    ($name:ident: $kind:ty) => (
        #[inline(always)]
        pub fn $name(&self) -> $kind {
            self.$name
        }
    );
}

macro_rules! ok(
    ($result:expr) => (match $result {
        Ok(result) => result,
        Err(error) => raise!(error),
    });
);

macro_rules! raise(
    ($message:expr) => (return Err(::Error::new($message)));
    ($($arg:tt)*) => (return Err(::Error::new(format!($($arg)*))));
);

macro_rules! some(
    ($option:expr, $($arg:tt)*) => (match $option {
        Some(value) => value,
        _ => raise!($($arg)*),
    });
);
