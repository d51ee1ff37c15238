// Abstract syntax tree for the toy C subset.
//
// Nodes serialize with an internal "type" tag carrying the node name, so the
// JSON form reads like {"type":"Binary","op":"+","left":{...},"right":{...}}.

use serde::{Serialize, Serializer};

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub struct Program {
    pub functions: Vec<Function>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    #[serde(serialize_with = "serialize_tagged_block")]
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

/// Parameter types. The grammar only admits `int` today.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Type {
    #[serde(rename = "int")]
    Int,
}

// Untagged on its own: as `Stmt::Block` the enum already writes the tag.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename = "Block")]
struct TaggedBlock<'a> {
    statements: &'a [Stmt],
}

fn serialize_tagged_block<S: Serializer>(block: &Block, serializer: S) -> Result<S::Ok, S::Error> {
    TaggedBlock { statements: &block.statements }.serialize(serializer)
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct VarDecl {
    pub name: String,
    pub init: Option<Expr>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign {
        name: String,
        value: Expr,
    },
    Return {
        value: Expr,
    },
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<ForInit>,
        cond: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    Block(Block),
    #[serde(rename = "ExprStmt")]
    Expr {
        expr: Expr,
    },
}

/// Initializer clause of a `for` head.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ForInit {
    #[serde(rename = "VarDecl")]
    Decl(VarDecl),
    #[serde(rename = "ExprStmt")]
    Expr { expr: Expr },
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    NumberLiteral {
        value: i64,
    },
    StringLiteral {
        value: String,
    },
    Identifier {
        name: String,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn number(value: i64) -> Self {
        Expr::NumberLiteral { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral { value: value.into() }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "==")]
    EqualEqual,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum UnaryOp {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

// Node counting: every Program, Function, Block, statement and expression is
// one node. Parameters belong to their Function and are not counted.

impl Program {
    pub fn node_count(&self) -> usize {
        1 + self.functions.iter().map(Function::node_count).sum::<usize>()
    }
}

impl Function {
    pub fn node_count(&self) -> usize {
        1 + self.body.node_count()
    }
}

impl Block {
    pub fn node_count(&self) -> usize {
        1 + self.statements.iter().map(Stmt::node_count).sum::<usize>()
    }
}

impl VarDecl {
    fn node_count(&self) -> usize {
        1 + self.init.as_ref().map_or(0, Expr::node_count)
    }
}

impl Stmt {
    pub fn node_count(&self) -> usize {
        match self {
            Stmt::VarDecl(decl) => decl.node_count(),
            Stmt::Assign { value, .. } => 1 + value.node_count(),
            Stmt::Return { value } => 1 + value.node_count(),
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                1 + cond.node_count()
                    + then_branch.node_count()
                    + else_branch.as_ref().map_or(0, |stmt| stmt.node_count())
            }
            Stmt::While { cond, body } => 1 + cond.node_count() + body.node_count(),
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                let init = match init {
                    Some(ForInit::Decl(decl)) => decl.node_count(),
                    Some(ForInit::Expr { expr }) => expr.node_count(),
                    None => 0,
                };
                1 + init
                    + cond.as_ref().map_or(0, Expr::node_count)
                    + update.as_ref().map_or(0, Expr::node_count)
                    + body.node_count()
            }
            // The block is itself the statement node.
            Stmt::Block(block) => block.node_count(),
            Stmt::Expr { expr } => 1 + expr.node_count(),
        }
    }
}

impl Expr {
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Expr::Unary { expr, .. } => 1 + expr.node_count(),
            Expr::NumberLiteral { .. } | Expr::StringLiteral { .. } | Expr::Identifier { .. } => 1,
            Expr::Call { args, .. } => 1 + args.iter().map(Expr::node_count).sum::<usize>(),
        }
    }
}
