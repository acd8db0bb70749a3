//! Built-in requirement tables.
//!
//! Tables only ever grow: a new extension or a new version gate is a new or
//! edited row here, never a change to the evaluator.

use super::requirement::ExtensionRequirement;
use crate::hwprobe::Extension::*;

const fn req(ext: crate::hwprobe::Extension) -> ExtensionRequirement {
    ExtensionRequirement::required(ext)
}

const fn opt(ext: crate::hwprobe::Extension) -> ExtensionRequirement {
    ExtensionRequirement::optional(ext)
}

/// RVA23U64 as reportable through `IMA_EXT_0`, with detection gates.
pub const RVA23: &[ExtensionRequirement] = &[
    req(Fd),
    req(C),
    req(V),
    req(Zba),
    req(Zbb),
    req(Zbs),
    req(Zicboz),
    opt(Zbc),
    opt(Zbkb),
    opt(Zbkc),
    opt(Zbkx),
    opt(Zknd),
    opt(Zkne),
    opt(Zknh),
    opt(Zksed),
    opt(Zksh),
    req(Zkt),
    req(Zvbb),
    opt(Zvbc),
    req(Zvkb),
    opt(Zvkg),
    opt(Zvkned),
    opt(Zvknha),
    opt(Zvknhb),
    opt(Zvksed),
    opt(Zvksh),
    req(Zvkt),
    opt(Zfh),
    req(Zfhmin),
    req(Zihintntl),
    opt(Zvfh),
    req(Zvfhmin),
    req(Zfa),
    opt(Ztso),
    opt(Zacas),
    req(Zicntr).since(6, 15),
    req(Zicond),
    req(Zihintpause),
    req(Zihpm).since(6, 15),
    req(Zve32x),
    req(Zve32f),
    req(Zve64x),
    req(Zve64f),
    req(Zve64d),
    req(Zimop),
    req(Zca),
    req(Zcb),
    req(Zcd),
    opt(Zcf),
    req(Zcmop),
    req(Zawrs),
    req(Zaamo).since(6, 15),
    req(Zalrsc).since(6, 15),
    req(Supm).since(6, 13),
    opt(Zfbfmin),
    opt(Zvfbfmin),
    opt(Zvfbfwma),
    req(Zicbom).since(6, 15),
    opt(Zabha),
    opt(Zalasr),
    req(Zicbop).since(6, 19),
    opt(Zilsd),
    opt(Zclsd),
];

/// Base behavior plus an informational Zba row.
pub const ZBA: &[ExtensionRequirement] = &[opt(Zba)];
