//! The fixed export surface of the generated module. These lists must stay
//! in sync with the symbols the compiled Capstone library actually provides,
//! or the produced module will fail to load or lack entry points.

/// C functions whitelisted on the generated module, in order: libc
/// allocators, the Capstone public API, and the custom `_print_insn_detail`
/// patched into the Capstone sources.
pub const EXPORTED_FUNCTIONS: [&str; 23] = [
    "_malloc",
    "_free",
    "_cs_open",
    "_cs_disasm",
    "_cs_free",
    "_cs_close",
    "_cs_option",
    "_cs_group_name",
    "_cs_insn_name",
    "_cs_insn_group",
    "_cs_reg_name",
    "_cs_errno",
    "_cs_support",
    "_cs_version",
    "_cs_strerror",
    "_cs_disasm_ex",
    "_cs_disasm_iter",
    "_cs_malloc",
    "_cs_reg_read",
    "_cs_reg_write",
    "_cs_op_count",
    "_cs_op_index",
    "_print_insn_detail",
];

/// Emscripten runtime helpers the calling JavaScript needs to marshal data
/// across the boundary. Provided by the toolchain, not by Capstone.
pub const RUNTIME_METHODS: [&str; 5] = [
    "ccall",
    "getValue",
    "setValue",
    "writeArrayToMemory",
    "UTF8ToString",
];

/// Per-architecture constant-definition files from the Python bindings,
/// relative to the Capstone checkout. Transliterated in this exact order.
pub const CONSTANT_SOURCES: [&str; 8] = [
    "bindings/python/capstone/arm64_const.py",
    "bindings/python/capstone/arm_const.py",
    "bindings/python/capstone/mips_const.py",
    "bindings/python/capstone/ppc_const.py",
    "bindings/python/capstone/sparc_const.py",
    "bindings/python/capstone/sysz_const.py",
    "bindings/python/capstone/x86_const.py",
    "bindings/python/capstone/xcore_const.py",
];
