use super::node::{Ast, ExprId, ExprKind, Function, Literal, StmtId, StmtKind};

/// S-expression rendering of the tree, used by tests and trace logging.
impl Ast {
    pub fn display_expr(&self, id: ExprId) -> String {
        let Some(expr) = self.expr(id) else {
            return "<dangling>".to_string();
        };
        match &expr.kind {
            ExprKind::BinOp { op, left, right } => {
                format!("({} {} {})", op, self.display_expr(*left), self.display_expr(*right))
            }
            ExprKind::Literal(Literal::Int(v)) => v.to_string(),
            ExprKind::Literal(Literal::Float(v)) => format!("{:?}", v),
            ExprKind::Literal(Literal::Bool(v)) => v.to_string(),
            ExprKind::Literal(Literal::String(sym)) => format!("{:?}", self.resolve(*sym)),
            ExprKind::UnaryOp { op, operand } => format!("({} {})", op, self.display_expr(*operand)),
            ExprKind::Identifier(sym) => self.resolve(*sym).to_string(),
            ExprKind::Call(call) => self.display_list(&format!("call {}", self.resolve(call.name)), &call.args),
            ExprKind::Index { array, index } => {
                format!("(index {} {})", self.resolve(*array), self.display_expr(*index))
            }
        }
    }

    pub fn display_stmt(&self, id: StmtId) -> String {
        let Some(stmt) = self.stmt(id) else {
            return "<dangling>".to_string();
        };
        match &stmt.kind {
            StmtKind::VarDecl { name, ty, init } => match init {
                Some(init) => format!("(decl {} {} {})", ty, self.resolve(*name), self.display_expr(*init)),
                None => format!("(decl {} {})", ty, self.resolve(*name)),
            },
            StmtKind::Assign { name, value } => format!("(= {} {})", self.resolve(*name), self.display_expr(*value)),
            StmtKind::IndexAssign { array, index, value } => format!(
                "(= (index {} {}) {})",
                self.resolve(*array),
                self.display_expr(*index),
                self.display_expr(*value)
            ),
            StmtKind::Return { value: Some(value) } => format!("(return {})", self.display_expr(*value)),
            StmtKind::Return { value: None } => "(return)".to_string(),
            StmtKind::If { cond, then, else_ } => match else_ {
                Some(else_) => format!(
                    "(if {} {} {})",
                    self.display_expr(*cond),
                    self.display_stmt(*then),
                    self.display_stmt(*else_)
                ),
                None => format!("(if {} {})", self.display_expr(*cond), self.display_stmt(*then)),
            },
            StmtKind::While { cond, body } => {
                format!("(while {} {})", self.display_expr(*cond), self.display_stmt(*body))
            }
            StmtKind::Block { stmts } => {
                let inner: Vec<_> = stmts.iter().map(|s| self.display_stmt(*s)).collect();
                format!("{{{}}}", inner.join(" "))
            }
            StmtKind::Print { args } => self.display_list("print", args),
            StmtKind::Call(call) => self.display_list(&format!("call {}", self.resolve(call.name)), &call.args),
        }
    }

    fn display_list(&self, head: &str, args: &[ExprId]) -> String {
        let mut out = format!("({}", head);
        for arg in args {
            out.push(' ');
            out.push_str(&self.display_expr(*arg));
        }
        out.push(')');
        out
    }

    pub fn display_function(&self, function: &Function) -> String {
        let params: Vec<_> = function
            .params
            .iter()
            .map(|(name, ty)| format!("{} {}", ty, self.resolve(*name)))
            .collect();
        let ret = function.return_type.map_or("void".to_string(), |ty| ty.to_string());
        format!(
            "(fn {} {} ({}) {})",
            ret,
            self.resolve(function.name),
            params.join(", "),
            self.display_stmt(function.body)
        )
    }
}
